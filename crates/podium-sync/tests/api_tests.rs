//! Integration tests for the sync endpoint.
//!
//! Router tests use Axum's `Router` directly via `tower::ServiceExt`
//! without starting a TCP server; lifecycle tests spawn a real server
//! on an ephemeral port to verify bind and shutdown behavior.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use podium_core::SharedStateStore;
use podium_sync::router::build_router;
use podium_sync::server::{ServerConfig, ServerError};
use podium_sync::startup::spawn_sync;
use podium_types::TimerSnapshot;
use serde_json::Value;
use tower::ServiceExt;

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn timer_state_serves_the_default_snapshot_on_a_fresh_run() {
    let store = SharedStateStore::new();
    let router = build_router(store);

    let response = router
        .oneshot(Request::get("/timer_state").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("application/json"));

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["time_text"], "00:00");
    assert_eq!(json["speaker_name"], "N/A");
    assert_eq!(json["speaker_segment"], "N/A");
    assert_eq!(json["is_warning"], false);
    assert_eq!(json["is_past_zero"], false);
}

#[tokio::test]
async fn timer_state_reflects_the_latest_publish() {
    let store = SharedStateStore::new();
    let router = build_router(store.clone());

    store
        .publish(TimerSnapshot {
            time_text: String::from("-01:05"),
            speaker_name: String::from("Grace"),
            speaker_segment: String::from("Keynote"),
            is_warning: false,
            is_past_zero: true,
        })
        .await;

    let response = router
        .oneshot(Request::get("/timer_state").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["time_text"], "-01:05");
    assert_eq!(json["speaker_name"], "Grace");
    assert_eq!(json["is_past_zero"], true);
    assert_eq!(json["is_warning"], false);
}

#[tokio::test]
async fn responses_allow_any_origin() {
    let store = SharedStateStore::new();
    let router = build_router(store);

    let response = router
        .oneshot(
            Request::get("/timer_state")
                .header(header::ORIGIN, "http://phone.local")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .unwrap();
    assert_eq!(allow_origin, "*");
}

#[tokio::test]
async fn any_other_path_is_not_found() {
    let store = SharedStateStore::new();
    let router = build_router(store);

    for path in ["/", "/timer", "/timer_state/extra", "/api/agents"] {
        let response = router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {path}");
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["status"], 404);
    }
}

#[tokio::test]
async fn binding_an_occupied_port_fails_without_spawning_a_task() {
    let occupant = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = occupant.local_addr().unwrap();

    let store = SharedStateStore::new();
    let config = ServerConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
    };

    let result = spawn_sync(&config, store).await;
    assert!(matches!(result, Err(ServerError::Bind(_))));
}

#[tokio::test]
async fn shutdown_releases_the_port() {
    let store = SharedStateStore::new();
    let config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
    };

    let handle = spawn_sync(&config, store).await.unwrap();
    let addr = handle.local_addr().unwrap();

    handle.shutdown(Duration::from_secs(2)).await;

    // The port must be free again once shutdown has returned.
    let rebound = tokio::net::TcpListener::bind(addr).await;
    assert!(rebound.is_ok(), "port {} still bound", addr.port());
}
