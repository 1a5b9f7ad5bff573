//! # Realtime Flow
//!
//! Webhook-driven state reaches every subscriber of the derived instance key
//! and no one else. Delivery is best effort.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::future::join_all;
    use serde_json::json;
    use shared_types::CardState;

    use crate::integration::harness::{headline_key, Harness};

    const WAIT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_fan_out_to_all_subscribers_of_the_key() {
        let harness = Harness::new();
        let key = headline_key("eu");
        let mut subscriptions: Vec<_> = (0..3).map(|_| harness.hub.subscribe(&key)).collect();
        assert_eq!(harness.hub.subscriber_count(&key), 3);

        harness
            .post_json(
                "/api/webhook/press/headline",
                &json!({"edition": "eu", "title": "Fan out"}),
            )
            .await;

        let received = join_all(
            subscriptions
                .iter_mut()
                .map(|s| tokio::time::timeout(WAIT, s.recv())),
        )
        .await;

        let expected = CardState::new(json!({"title": "Fan out"}));
        for frame in received {
            assert_eq!(frame.expect("delivered"), Some(expected.clone()));
        }
    }

    #[tokio::test]
    async fn test_other_instances_receive_nothing() {
        let harness = Harness::new();
        let mut eu = harness.hub.subscribe(&headline_key("eu"));
        let mut us = harness.hub.subscribe(&headline_key("us"));

        harness
            .post_json(
                "/api/webhook/press/headline",
                &json!({"edition": "us", "title": "Only US"}),
            )
            .await;

        assert!(tokio::time::timeout(WAIT, us.recv()).await.is_ok());
        assert!(tokio::time::timeout(Duration::from_millis(50), eu.recv())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_push_without_subscribers_still_persists() {
        let harness = Harness::new();

        harness
            .post_json(
                "/api/webhook/press/headline",
                &json!({"edition": "eu", "title": "Nobody watching"}),
            )
            .await;

        assert_eq!(harness.store.len(), 1);
        assert_eq!(harness.hub.delivered_count(), 0);
    }

    #[tokio::test]
    async fn test_frames_arrive_in_order() {
        let harness = Harness::new();
        let key = headline_key("eu");
        let mut subscription = harness.hub.subscribe(&key);

        for title in ["one", "two", "three"] {
            harness
                .post_json(
                    "/api/webhook/press/headline",
                    &json!({"edition": "eu", "title": title}),
                )
                .await;
        }

        for title in ["one", "two", "three"] {
            let frame = tokio::time::timeout(WAIT, subscription.recv()).await.unwrap();
            assert_eq!(frame, Some(CardState::new(json!({ "title": title }))));
        }
    }
}
