//! # State Write Flow
//!
//! ```text
//! render (params) ──derive──→ cardKey ──issue──→ API key
//!                                 │
//! POST /api/state {apiKey, cardKey, state} ──gate──→ StateStore
//!                                                       │
//! render (same params, any order) ←─────────────────────┘
//! ```

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use cs_01_card_state::{KeyDeriver, StateStore, INVALID_KEY_MESSAGE};
    use serde_json::json;
    use shared_types::{CardInstanceKey, CardState};

    use crate::integration::harness::{headline_key, Harness};

    #[tokio::test]
    async fn test_render_key_matches_derivation_in_any_param_order() {
        let harness = Harness::new();

        let (_, a) = harness.get("/api/data/press/headline?edition=eu&lang=fr").await;
        let (_, b) = harness.get("/api/data/press/headline?lang=fr&edition=eu").await;
        assert_eq!(a["cardKey"], b["cardKey"]);

        let expected = KeyDeriver::derive("press", "headline", [("lang", "fr"), ("edition", "eu")]);
        assert_eq!(a["cardKey"], json!(expected.as_str()));
    }

    #[tokio::test]
    async fn test_gated_write_is_visible_to_render() {
        let harness = Harness::new();
        let key = headline_key("eu");
        harness.keys.issue(key.clone(), "s3cret");

        let (status, body) = harness
            .post_json(
                "/api/state",
                &json!({"apiKey": "s3cret", "cardKey": key, "state": {"title": "Markets rally"}}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, rendered) = harness.get("/api/data/press/headline?edition=eu").await;
        assert_eq!(rendered["data"], json!({"title": "Markets rally"}));
    }

    #[tokio::test]
    async fn test_form_encoded_write_with_embedded_json() {
        let harness = Harness::new();
        let key = headline_key("us");
        harness.keys.issue(key.clone(), "s3cret");

        let body = format!(
            "apiKey=s3cret&cardKey={}&state=%7B%22title%22%3A%22Form%22%7D",
            key
        );
        let (status, _) = harness
            .post("/api/state", "application/x-www-form-urlencoded", body)
            .await;
        assert_eq!(status, StatusCode::OK);

        let stored = harness.store.get(&key).await.unwrap();
        assert_eq!(stored, Some(CardState::new(json!({"title": "Form"}))));
    }

    #[tokio::test]
    async fn test_rejected_key_leaves_state_untouched() {
        let harness = Harness::new();
        let key = headline_key("eu");
        harness.keys.issue(key.clone(), "s3cret");
        harness
            .store
            .set(&key, CardState::new(json!({"title": "Original"})))
            .await
            .unwrap();

        let (status, body) = harness
            .post_json(
                "/api/state",
                &json!({"apiKey": "guess", "cardKey": key, "state": {"title": "Defaced"}}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert!(body["message"].as_str().unwrap().starts_with(INVALID_KEY_MESSAGE));

        let stored = harness.store.get(&key).await.unwrap();
        assert_eq!(stored, Some(CardState::new(json!({"title": "Original"}))));
        assert_eq!(harness.metrics.to_json(0)["state"]["auth_rejected"], 1);
    }

    #[tokio::test]
    async fn test_key_for_other_instance_is_rejected() {
        let harness = Harness::new();
        harness.keys.issue(headline_key("eu"), "s3cret");

        let other = headline_key("us");
        let (status, _) = harness
            .post_json(
                "/api/state",
                &json!({"apiKey": "s3cret", "cardKey": other, "state": {}}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(harness.store.get(&other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_state_is_param_error() {
        let harness = Harness::new();
        let key = CardInstanceKey::from_raw("k");
        harness.keys.issue(key.clone(), "s3cret");

        let (status, body) = harness
            .post_json(
                "/api/state",
                &json!({"apiKey": "s3cret", "cardKey": key, "state": "{not json"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert!(harness.store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_state_write_does_not_push_realtime() {
        let harness = Harness::new();
        let key = headline_key("eu");
        harness.keys.issue(key.clone(), "s3cret");
        let mut subscription = harness.hub.subscribe(&key);

        harness
            .post_json(
                "/api/state",
                &json!({"apiKey": "s3cret", "cardKey": key, "state": {"title": "Quiet"}}),
            )
            .await;

        let pushed =
            tokio::time::timeout(std::time::Duration::from_millis(50), subscription.recv()).await;
        assert!(pushed.is_err(), "client writes are not broadcast");
    }
}
