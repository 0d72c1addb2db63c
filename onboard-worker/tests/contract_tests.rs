//! API contract tests for the webhook worker
//!
//! These tests verify the HTTP contracts: the verification challenge
//! echo, event dispatch, error status mapping, and the store writes each
//! path produces. The store is in-memory; no database required.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use onboard_core::event::{APP_ADD_USER, USER_CREATE};
use onboard_storage::RecordStore;
use onboard_tests::builders::{raw_post, verification_request, EnvelopeBuilder};
use onboard_tests::mocks::{FaultConfig, MemoryStore};
use onboard_worker::handler::{event_handler, health_handler, verify_handler, AppState};
use onboard_worker::processor::EventProcessor;
use serde_json::Value;
use std::sync::Arc;
use tower::Service;

// Helper trait to drive the router one request at a time
trait RouterExt {
    async fn oneshot_call(self, req: Request<Body>) -> axum::response::Response;
}

impl RouterExt for Router {
    async fn oneshot_call(mut self, req: Request<Body>) -> axum::response::Response {
        self.call(req).await.expect("router call is infallible")
    }
}

/// Build the worker router over a fresh in-memory store
fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let record_store: Arc<dyn RecordStore> = store.clone();
    let processor = Arc::new(EventProcessor::new(record_store));

    let app = Router::new()
        .route("/", get(verify_handler).post(event_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { processor });

    (app, store)
}

async fn response_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable")
        .to_vec()
}

mod verification_contract {
    use super::*;

    #[tokio::test]
    async fn challenge_is_echoed_back() {
        let (app, _store) = test_app();

        let response = app.oneshot_call(verification_request("abc123")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&response_body(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"verification": "abc123"}));
    }

    #[tokio::test]
    async fn missing_challenge_header_is_client_error() {
        let (app, _store) = test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot_call(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod event_contract {
    use super::*;

    #[tokio::test]
    async fn unparseable_body_is_client_error() {
        let (app, store) = test_app();

        let response = app.oneshot_call(raw_post("not json")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.journal().is_empty());
    }

    #[tokio::test]
    async fn qualifying_event_registers_client_and_user() {
        let (app, store) = test_app();

        let request = EnvelopeBuilder::new()
            .user_target("u@x.com", "U Name")
            .group_target("EXT-acme")
            .into_request();

        let response = app.oneshot_call(request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response_body(response).await.is_empty());

        assert!(store.client("acme").is_some());
        let user = store.user("acme", "u@x.com").unwrap();
        assert!(user.is_admin);
        assert_eq!(user.user_name, "U Name");
    }

    #[tokio::test]
    async fn non_qualifying_event_is_acknowledged_without_writes() {
        let (app, store) = test_app();

        for event_type in [APP_ADD_USER, USER_CREATE, "user.session.start"] {
            let request = EnvelopeBuilder::new()
                .event_type(event_type)
                .user_target("u@x.com", "U Name")
                .group_target("EXT-acme")
                .into_request();

            let response = app.clone().oneshot_call(request).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert!(response_body(response).await.is_empty());
        }

        assert!(store.journal().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_server_error() {
        let (app, store) = test_app();
        store.set_faults(FaultConfig {
            fail_user_writes: true,
            ..Default::default()
        });

        let request = EnvelopeBuilder::new()
            .user_target("u@x.com", "U Name")
            .group_target("EXT-acme")
            .into_request();

        let response = app.oneshot_call(request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn repeated_delivery_is_idempotent() {
        let (app, store) = test_app();

        for _ in 0..2 {
            let request = EnvelopeBuilder::new()
                .user_target("u@x.com", "U Name")
                .group_target("EXT-acme")
                .into_request();

            let response = app.clone().oneshot_call(request).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(store.client_count(), 1);
        assert_eq!(store.user_count(), 1);
    }
}

mod health_contract {
    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let (app, _store) = test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot_call(request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&response_body(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
    }
}
