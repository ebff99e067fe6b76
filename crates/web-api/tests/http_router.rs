//! HTTP round trips through the axum router.
// Integration test file: unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
//!
//! Run with: cargo test -p web-api --test http_router

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use platform::mocks::{MockAudioModule, MockDelay};
use platform::{PinRoles, TransportId};
use playback::{AudioPlayer, SharedAudioPlayer};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`
use web_api::{build_router, SharedPlayer};

fn setup_player() -> SharedPlayer<MockAudioModule, MockDelay> {
    Arc::new(SharedAudioPlayer::new(AudioPlayer::new(
        MockAudioModule::responding_on(TransportId::Uart1, PinRoles::Normal),
        MockDelay::new(),
    )))
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_body(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

#[tokio::test]
async fn test_play_over_http() {
    let player = setup_player();
    let app = build_router(Arc::clone(&player));

    let response = app
        .oneshot(test_request("/api/sd/play?path=%2F012.mp3"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body: Value = serde_json::from_slice(&extract_body(response.into_body()).await).unwrap();
    assert_eq!(body["path"], "/012.mp3");
    assert_eq!(body["track"], 12);
    assert!(player.is_playing());
}

#[tokio::test]
async fn test_bad_volume_over_http() {
    let app = build_router(setup_player());
    let response = app
        .oneshot(test_request("/api/sd/volume?level=99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_info_over_http_is_plain_text() {
    let player = setup_player();
    player.ensure_ready().unwrap();
    let app = build_router(player);

    let response = app.oneshot(test_request("/api/sd/info")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/plain"));
    let text = String::from_utf8(extract_body(response.into_body()).await).unwrap();
    assert!(text.contains("Audio module ready on UART1"));
}

#[tokio::test]
async fn test_unknown_api_route_over_http() {
    let app = build_router(setup_player());
    let response = app
        .oneshot(test_request("/api/does/not/exist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&extract_body(response.into_body()).await).unwrap();
    assert_eq!(body["error"], "API route not found");
}
