//! `/api/sd/*` handlers.
//!
//! Each handler takes the shared player and the already-extracted query
//! parameters and returns an [`ApiResponse`]. They block for as long as the
//! player does (a full discovery waits out every settle delay), so async
//! servers must run them on a blocking thread; see [`crate::server`].

use std::collections::HashMap;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;
use platform::{AudioModule, Volume};
use playback::{AudioError, SharedAudioPlayer};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::response::ApiResponse;

/// Reply to `/api/sd/list`; the module cannot enumerate its card.
pub const LIST_UNAVAILABLE: &str = "Listing files is not available for the serial audio module. \
     Use numeric track indices with /api/sd/play?path=/001.mp3 or /api/sd/play?path=1";

/// Reply to `/api/sd/info` before anything was logged.
pub const NO_DIAGNOSTICS: &str = "No audio module diagnostic info available";

#[derive(Debug, Serialize)]
struct PlayBody<'a> {
    playing: bool,
    path: &'a str,
    track: u32,
}

#[derive(Debug, Serialize)]
struct PlayingBody {
    playing: bool,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    playing: bool,
    ready: bool,
    volume: u8,
}

#[derive(Debug, Serialize)]
struct VolumeBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    set: Option<bool>,
    volume: u8,
}

#[derive(Debug, Serialize)]
struct ReinitBody {
    reinit: bool,
    info: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Route `path` to its handler.
pub fn dispatch<R, M, D>(
    player: &SharedAudioPlayer<R, M, D>,
    path: &str,
    params: &HashMap<String, String>,
) -> ApiResponse
where
    R: RawMutex,
    M: AudioModule,
    D: DelayNs,
{
    let param = |name: &str| params.get(name).map(String::as_str);
    let result = match path.trim_end_matches('/') {
        "/api/sd/play" => play(player, param("path")),
        "/api/sd/stop" => Ok(stop(player)),
        "/api/sd/status" => Ok(status(player)),
        "/api/sd/volume" => volume(player, param("level")),
        "/api/sd/reinit" => Ok(reinit(player)),
        "/api/sd/info" => Ok(diagnostics(player)),
        "/api/sd/list" => Ok(list()),
        _ => Err(ApiError::NotFound),
    };
    result.unwrap_or_else(|e| {
        warn!(path, error = %e, "request failed");
        e.into()
    })
}

/// `GET /api/sd/play?path=<token>`
pub fn play<R, M, D>(
    player: &SharedAudioPlayer<R, M, D>,
    path: Option<&str>,
) -> Result<ApiResponse, ApiError>
where
    R: RawMutex,
    M: AudioModule,
    D: DelayNs,
{
    let path = path.ok_or(ApiError::MissingParam("path"))?;
    match player.play(path) {
        Ok(track) => {
            info!(path, track = track.get(), "playback started");
            Ok(ApiResponse::ok(&PlayBody {
                playing: true,
                path,
                track: track.get(),
            }))
        }
        Err(AudioError::InvalidTrack) => Err(ApiError::InvalidTrack(path.to_owned())),
        Err(e) => Err(ApiError::Playback(e)),
    }
}

/// `GET /api/sd/stop`
pub fn stop<R, M, D>(player: &SharedAudioPlayer<R, M, D>) -> ApiResponse
where
    R: RawMutex,
    M: AudioModule,
    D: DelayNs,
{
    player.stop();
    ApiResponse::ok(&PlayingBody { playing: false })
}

/// `GET /api/sd/status`
pub fn status<R, M, D>(player: &SharedAudioPlayer<R, M, D>) -> ApiResponse
where
    R: RawMutex,
    M: AudioModule,
    D: DelayNs,
{
    let status = player.status();
    ApiResponse::ok(&StatusBody {
        playing: status.playing,
        ready: status.ready,
        volume: status.volume.get(),
    })
}

/// `GET /api/sd/volume[?level=<0..=30>]`
///
/// Without `level` the stored volume is returned. With it, the level must be
/// an integer in range; the reply is `500` when the module could not be
/// reached, although the level is stored anyway.
pub fn volume<R, M, D>(
    player: &SharedAudioPlayer<R, M, D>,
    level: Option<&str>,
) -> Result<ApiResponse, ApiError>
where
    R: RawMutex,
    M: AudioModule,
    D: DelayNs,
{
    let Some(level) = level else {
        return Ok(ApiResponse::ok(&VolumeBody {
            set: None,
            volume: player.volume().get(),
        }));
    };

    let invalid = ApiError::InvalidVolume {
        min: Volume::MIN.get(),
        max: Volume::MAX.get(),
    };
    let requested = level.trim().parse::<i32>().map_err(|_| invalid.clone())?;
    let requested = Volume::try_new(requested).map_err(|_| invalid)?;

    let set = player.set_volume(i32::from(requested.get()));
    if let Err(e) = set {
        warn!(level = requested.get(), error = %e, "volume stored but not applied");
    }
    let body = VolumeBody {
        set: Some(set.is_ok()),
        volume: player.volume().get(),
    };
    Ok(ApiResponse::json(if set.is_ok() { 200 } else { 500 }, &body))
}

/// `GET /api/sd/reinit`
///
/// Reinit and the diagnostic snapshot happen under one lock, so `info`
/// describes exactly this reinit.
pub fn reinit<R, M, D>(player: &SharedAudioPlayer<R, M, D>) -> ApiResponse
where
    R: RawMutex,
    M: AudioModule,
    D: DelayNs,
{
    let (ok, info) = player.with(|player| {
        let ok = player.reinit().is_ok();
        (ok, player.diagnostics().to_string())
    });
    info!(ok, "audio module reinit");
    ApiResponse::json(if ok { 200 } else { 500 }, &ReinitBody { reinit: ok, info })
}

/// `GET /api/sd/info` (plain text)
pub fn diagnostics<R, M, D>(player: &SharedAudioPlayer<R, M, D>) -> ApiResponse
where
    R: RawMutex,
    M: AudioModule,
    D: DelayNs,
{
    let mut text = String::new();
    if player.write_diagnostics(&mut text).is_err() || text.is_empty() {
        return ApiResponse::text(NO_DIAGNOSTICS);
    }
    ApiResponse::text(text)
}

/// `GET /api/sd/list`
pub fn list() -> ApiResponse {
    ApiResponse::ok(&ErrorBody {
        error: LIST_UNAVAILABLE,
    })
}
