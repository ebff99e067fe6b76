//! REST surface for the audio module controller.
//!
//! - [`sd`]: handlers for `/api/sd/*`, independent of any HTTP framework
//! - [`server`]: axum router running those handlers on blocking threads
//! - [`response`] / [`error`]: status code and body types
//! - [`config`] / [`sim`]: host simulator settings and std delay
//!
//! | Endpoint | Reply |
//! |----------|-------|
//! | `/api/sd/play?path=` | `{"playing":true,"path":..,"track":n}`, 400 on missing or invalid `path`, 500 when the module is unavailable |
//! | `/api/sd/stop` | `{"playing":false}` |
//! | `/api/sd/status` | `{"playing":..,"ready":..,"volume":n}` |
//! | `/api/sd/volume[?level=]` | `{"volume":n}` or `{"set":..,"volume":n}` (500 if not applied), 400 when `level` is not in 0..=30 |
//! | `/api/sd/reinit` | `{"reinit":..,"info":"<log>"}`, 500 on failure |
//! | `/api/sd/info` | diagnostic log as plain text |
//! | `/api/sd/list` | `{"error":..}` (listing is not supported) |
//! | other `/api` paths | 404 `{"error":"API route not found"}` |
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod response;
pub mod sd;
pub mod server;
pub mod sim;

pub use error::ApiError;
pub use response::{ApiBody, ApiResponse};
pub use server::{build_router, SharedPlayer};
