//! axum router over the `/api/sd` handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::routing::get;
use axum::Router;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal::delay::DelayNs;
use platform::AudioModule;
use playback::SharedAudioPlayer;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::sd;

/// Player handle shared by all request handlers.
pub type SharedPlayer<M, D> = Arc<SharedAudioPlayer<CriticalSectionRawMutex, M, D>>;

/// Build the application router.
///
/// Everything under `/api` goes through [`sd::dispatch`]; unknown API paths
/// answer `404 {"error":"API route not found"}`.
pub fn build_router<M, D>(player: SharedPlayer<M, D>) -> Router
where
    M: AudioModule + Send + 'static,
    M::Transport: Send + 'static,
    D: DelayNs + Send + 'static,
{
    Router::new()
        .route("/api", get(api::<M, D>))
        .route("/api/*rest", get(api::<M, D>))
        .with_state(player)
}

async fn api<M, D>(
    State(player): State<SharedPlayer<M, D>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResponse
where
    M: AudioModule + Send + 'static,
    M::Transport: Send + 'static,
    D: DelayNs + Send + 'static,
{
    let path = uri.path().to_owned();
    debug!(%path, "api request");
    // the player blocks through discovery settle delays
    let handled = tokio::task::spawn_blocking(move || sd::dispatch(&player, &path, &params)).await;
    handled.unwrap_or_else(|e| {
        error!(error = %e, "api handler did not complete");
        ApiError::Internal("handler did not complete".to_owned()).into()
    })
}
