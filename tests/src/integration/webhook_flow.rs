//! # Webhook Flow
//!
//! The webhook path answers `200 {}` whatever happens internally, while the
//! key-gated client paths surface every error. Outcomes are only observable
//! through the store, the realtime hub and the metrics counters.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cs_01_card_state::{KeyDeriver, StateStore};
    use cs_06_api_gateway::GatewayConfig;
    use serde_json::json;
    use shared_types::CardState;

    use crate::integration::harness::{headline_key, Harness};

    const HEADLINE: &str = "/api/webhook/press/headline";

    #[tokio::test]
    async fn test_webhook_persists_and_pushes() {
        let harness = Harness::new();
        let key = headline_key("eu");
        let mut subscription = harness.hub.subscribe(&key);

        let (status, body) = harness
            .post_json(HEADLINE, &json!({"edition": "eu", "title": "Election night"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let expected = CardState::new(json!({"title": "Election night"}));
        assert_eq!(harness.store.get(&key).await.unwrap(), Some(expected.clone()));

        let pushed = tokio::time::timeout(Duration::from_secs(1), subscription.recv())
            .await
            .expect("push arrives");
        assert_eq!(pushed, Some(expected));

        let metrics = harness.metrics.to_json(harness.hub.delivered_count());
        assert_eq!(metrics["webhooks"]["received"], 1);
        assert_eq!(metrics["webhooks"]["state_updates"], 1);
        assert_eq!(metrics["realtime"]["pushes"], 1);
    }

    #[tokio::test]
    async fn test_render_reads_webhook_state() {
        let harness = Harness::new();
        harness
            .post_json(HEADLINE, &json!({"edition": "asia", "title": "Typhoon warning"}))
            .await;

        let (_, rendered) = harness.get("/api/data/press/headline?edition=asia").await;
        assert_eq!(rendered["data"], json!({"title": "Typhoon warning"}));
        assert_eq!(rendered["cardKey"], json!(headline_key("asia").as_str()));
    }

    #[tokio::test]
    async fn test_silent_success_for_every_failure() {
        let harness = Harness::new();

        let cases = [
            ("/api/webhook/press/missing", "application/json", "{}"),
            ("/api/webhook/press/static", "application/json", "{}"),
            (HEADLINE, "application/json", r#"{"fail": true}"#),
            (HEADLINE, "application/json", "{truncated"),
            (HEADLINE, "application/json", ""),
            (HEADLINE, "text/plain", "title=plain"),
        ];

        for (uri, content_type, body) in cases {
            let (status, response) = harness.post(uri, content_type, body).await;
            assert_eq!(status, StatusCode::OK, "{} {:?}", uri, body);
            assert_eq!(response, json!({}), "{} {:?}", uri, body);
        }

        assert!(harness.store.is_empty());
        let metrics = harness.metrics.to_json(0);
        assert_eq!(metrics["webhooks"]["received"], cases.len());
        assert_eq!(metrics["webhooks"]["failures"], 1);
        assert_eq!(metrics["webhooks"]["state_updates"], 0);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_still_acknowledged() {
        let harness = Harness::new();

        for uri in ["/api/webhook/%FF/headline", "/api/webhook/press/%C3%28"] {
            let (status, response) = harness.post_json(uri, &json!({"title": "x"})).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(response, json!({}), "{}", uri);
        }

        assert!(harness.store.is_empty());
        assert_eq!(harness.metrics.to_json(0)["webhooks"]["received"], 2);
    }

    #[tokio::test]
    async fn test_client_paths_surface_errors_webhook_does_not() {
        let harness = Harness::new();

        let (status, body) = harness.get("/api/card?pack=press&card=missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": true, "message": "Card not found"}));

        let (status, body) = harness.post_json("/api/webhook/press/missing", &json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn test_form_encoded_webhook() {
        let harness = Harness::new();
        let payload = r#"{"edition":"eu","title":"Via form"}"#;
        let body = format!("payload={}", payload.replace('"', "%22").replace('{', "%7B").replace('}', "%7D"));

        let (status, _) = harness
            .post(HEADLINE, "application/x-www-form-urlencoded", body)
            .await;
        assert_eq!(status, StatusCode::OK);

        let stored = harness.store.get(&headline_key("eu")).await.unwrap();
        assert_eq!(stored, Some(CardState::new(json!({"title": "Via form"}))));
    }

    #[tokio::test]
    async fn test_non_realtime_card_persists_without_push() {
        let harness = Harness::new();
        let key = KeyDeriver::derive("press", "ticker", std::iter::empty::<(&str, &str)>());
        let mut subscription = harness.hub.subscribe(&key);

        harness
            .post_json("/api/webhook/press/ticker", &json!({"symbol": "ACME", "price": 12}))
            .await;

        assert_eq!(
            harness.store.get(&key).await.unwrap(),
            Some(CardState::new(json!({"symbol": "ACME", "price": 12})))
        );
        let pushed = tokio::time::timeout(Duration::from_millis(50), subscription.recv()).await;
        assert!(pushed.is_err());
    }

    #[tokio::test]
    async fn test_oversized_webhook_still_acknowledged() {
        let mut config = GatewayConfig::default();
        config.limits.max_request_size = 64;
        let harness = Harness::with_config(config);

        let body = json!({"edition": "eu", "title": "x".repeat(256)}).to_string();
        let request = Request::builder()
            .method("POST")
            .uri(HEADLINE)
            .header("content-type", "application/json")
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap();

        let (status, response) = harness.send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({}));
        assert!(harness.store.get(&headline_key("eu")).await.unwrap().is_none());
    }
}
