//! Hardware Abstraction Layer (HAL) for the diorama controller board
//!
//! This crate provides trait-based abstractions for the hardware the audio
//! subsystem talks to, enabling development and testing without the board.
//!
//! # Architecture Layers
//!
//! ```text
//! REST layer (web-api crate)
//!         ↓
//! Playback control (playback crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Board UART drivers
//! ```
//!
//! # Contents
//!
//! - [`AudioModule`] - Serial audio player driver
//! - [`peripheral`] - Transport identifiers, pin roles, UART framing
//! - [`audio_types`] - [`Volume`] and [`TrackIndex`] newtypes
//! - [`config`] - Board pins, timings and limits
//! - `mocks` - Mock driver and delay (with `std` or in tests)
//!
//! # Features
//!
//! - `std`: Enable standard library support and the mocks (for testing)
//! - `defmt`: Enable `defmt::Format` derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{AudioModule, PinRoles, TransportId, UartConfig};
//!
//! fn answers<M: AudioModule>(module: &mut M) -> bool {
//!     match module.open(TransportId::Uart2, UartConfig::eight_n_one(9600), PinRoles::Normal) {
//!         Ok(mut transport) => {
//!             let ok = module.handshake(&mut transport);
//!             module.close(transport);
//!             ok
//!         }
//!         Err(_) => false,
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio;
pub mod audio_types;
pub mod config;
pub mod mocks;
pub mod peripheral;

// Re-export main high-level traits
pub use audio::AudioModule;
pub use audio_types::{OutOfRangeError, TrackIndex, Volume};

// Re-export peripheral types
pub use peripheral::{PinRoles, TransportId, UartConfig};
