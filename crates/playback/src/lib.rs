//! Audio module bring-up and playback control: discovery over unknown
//! wiring, lazy readiness, track resolution and diagnostics.
//!
//! # Layout
//!
//! ```text
//! SharedAudioPlayer (shared)      one mutex around everything below
//!   └─ AudioPlayer (controller)   play / stop / volume / reinit
//!        ├─ Discovery             walks DEFAULT_CANDIDATES (candidates)
//!        ├─ DiagnosticLog         bounded text log (diagnostics)
//!        └─ track::resolve        "/007.mp3" -> 7
//! ```
//!
//! The driver and the delay come from `platform`; with the `std` feature the
//! `platform` mocks drive everything on the host.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
#![warn(missing_docs)]

pub mod candidates;
pub mod controller;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod shared;
pub mod track;

pub use candidates::{TransportCandidate, DEFAULT_CANDIDATES};
pub use controller::{AudioPlayer, PlayerStatus};
pub use diagnostics::{DiagnosticLog, Severity};
pub use discovery::{Discovery, DiscoveryOutcome, DiscoveryState};
pub use error::AudioError;
pub use shared::SharedAudioPlayer;
pub use track::{resolve, track_index};
