//! Board configuration and constants
//!
//! This module defines central configuration values used across the firmware.
//! Pin numbers, timings and limits should reference these constants rather
//! than hardcoding values.

/// The application name
pub const APP_NAME: &str = "Diorama";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// GPIO the board reads module data on when wired as labelled.
pub const MODULE_RX_PIN: u8 = 16;

/// GPIO the board drives module data on when wired as labelled.
pub const MODULE_TX_PIN: u8 = 17;

/// Serial rate of the audio module (fixed by the module firmware).
pub const MODULE_BAUD: u32 = 9600;

/// Time the module needs after a UART is opened before it answers.
pub const SETTLE_DELAY_MS: u32 = 200;

/// Pause between closing all transports and re-probing on reinit.
pub const REINIT_QUIESCE_MS: u32 = 50;

/// Handshake tries on the primary UART in its labelled orientation.
///
/// This is the wiring that is correct most of the time, so a slow module
/// boot gets extra chances before the swapped layouts are tried.
pub const PRIMARY_ATTEMPTS: u8 = 3;

/// Volume applied at boot.
pub const DEFAULT_VOLUME: u8 = 20;

/// Module volume ceiling.
pub const MAX_VOLUME: u8 = 30;

/// Lines kept by the diagnostic log before the oldest is evicted.
pub const DIAGNOSTIC_LINES: usize = 32;

/// Bytes per diagnostic line; longer lines are truncated.
pub const DIAGNOSTIC_LINE_WIDTH: usize = 160;
