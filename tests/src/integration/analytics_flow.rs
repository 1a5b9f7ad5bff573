//! # Analytics Flow
//!
//! `POST /api/analytics` is key-gated like state writes, but lands in an
//! append-only log under `pack.card.item-key` and never touches card state.

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::integration::harness::{headline_key, Harness};

    fn setup() -> (Harness, String) {
        let harness = Harness::new();
        let key = headline_key("eu");
        harness.keys.issue(key.clone(), "s3cret");
        (harness, key.as_str().to_string())
    }

    #[tokio::test]
    async fn test_batch_is_recorded_with_namespaced_keys() {
        let (harness, card_key) = setup();

        let (status, body) = harness
            .post_json(
                "/api/analytics",
                &json!({
                    "apiKey": "s3cret",
                    "cardKey": card_key,
                    "pack": "press",
                    "card": "headline",
                    "events": [
                        {"key": "view", "data": {"ms": 120}},
                        {"key": "click", "data": {"target": "more"}}
                    ]
                }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let mut keys: Vec<String> = harness
            .sink
            .inner
            .events_with_prefix("press.headline.")
            .into_iter()
            .map(|e| e.event_key)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["press.headline.click", "press.headline.view"]);
        assert_eq!(harness.metrics.to_json(0)["analytics"]["events"], 2);
    }

    #[tokio::test]
    async fn test_single_event_as_json_string() {
        let (harness, card_key) = setup();

        let (status, _) = harness
            .post_json(
                "/api/analytics",
                &json!({
                    "apiKey": "s3cret",
                    "cardKey": card_key,
                    "pack": "press",
                    "card": "headline",
                    "events": "{\"key\": \"share\"}"
                }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        let events = harness.sink.inner.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_key, "press.headline.share");
    }

    #[tokio::test]
    async fn test_partial_failure_reports_error_but_keeps_siblings() {
        let (harness, card_key) = setup();

        let (status, body) = harness
            .post_json(
                "/api/analytics",
                &json!({
                    "apiKey": "s3cret",
                    "cardKey": card_key,
                    "pack": "press",
                    "card": "headline",
                    "events": [
                        {"key": "view"},
                        {"key": "reject-me"},
                        {"key": "scroll"}
                    ]
                }),
            )
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], true);
        assert!(body["message"].as_str().unwrap().contains("reject-me"));

        // No rollback: the other submissions completed
        assert_eq!(harness.sink.inner.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_key_records_nothing() {
        let (harness, card_key) = setup();

        let (status, _) = harness
            .post_json(
                "/api/analytics",
                &json!({
                    "apiKey": "nope",
                    "cardKey": card_key,
                    "pack": "press",
                    "card": "headline",
                    "events": [{"key": "view"}]
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(harness.sink.inner.is_empty());
    }

    #[tokio::test]
    async fn test_events_do_not_touch_state() {
        let (harness, card_key) = setup();

        harness
            .post_json(
                "/api/analytics",
                &json!({
                    "apiKey": "s3cret",
                    "cardKey": card_key,
                    "pack": "press",
                    "card": "headline",
                    "events": [{"key": "view"}]
                }),
            )
            .await;

        assert!(harness.store.is_empty());
    }

    #[tokio::test]
    async fn test_scalar_events_are_param_error() {
        let (harness, card_key) = setup();

        let (status, body) = harness
            .post_json(
                "/api/analytics",
                &json!({
                    "apiKey": "s3cret",
                    "cardKey": card_key,
                    "pack": "press",
                    "card": "headline",
                    "events": 42
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }
}
