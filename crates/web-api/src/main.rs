//! diorama-sim: serves the audio REST API backed by a simulated module.
//!
//! Configure with `DIORAMA_BIND`, `DIORAMA_SIM_WIRING` and
//! `DIORAMA_SIM_SETTLE_MS` (see `web_api::config`), and the log filter with
//! `RUST_LOG`.

use std::sync::Arc;

use platform::config::{APP_NAME, APP_VERSION};
use platform::mocks::MockAudioModule;
use playback::{AudioPlayer, SharedAudioPlayer};
use tracing::info;
use web_api::config::SimConfig;
use web_api::sim::StdDelay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting {} v{} audio API simulator", APP_NAME, APP_VERSION);

    let config = SimConfig::from_env()?;
    let module = match config.wiring {
        Some((transport, roles)) => {
            info!(%transport, roles = roles.name(), "simulated module wired");
            MockAudioModule::responding_on(transport, roles)
        }
        None => {
            info!("simulating a missing module");
            MockAudioModule::new()
        }
    };

    let player = AudioPlayer::new(module, StdDelay).with_settle_delay(config.settle_ms);
    let router = web_api::build_router(Arc::new(SharedAudioPlayer::new(player)));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", config.bind);
    axum::serve(listener, router).await?;
    Ok(())
}
