//! Serial audio module abstraction
//!
//! The module (a DFPlayer-class MP3 player on a UART) is driven through an
//! opaque vendor protocol. Everything above this trait only needs to open a
//! serial transport, check that the module answers, and issue a handful of
//! commands addressed by numeric track index.

use crate::audio_types::{TrackIndex, Volume};
use crate::peripheral::{PinRoles, TransportId, UartConfig};

/// Serial-attached audio player driver.
///
/// Implementations own the UART peripherals; a `Transport` is an open
/// channel to one of them with a particular pin orientation. At most one
/// transport is open at a time in practice, but the trait does not rely on
/// that.
pub trait AudioModule {
    /// Open serial channel to the module
    type Transport;

    /// Error type
    type Error: core::fmt::Debug;

    /// Configure `transport` with `config`, routing RX/TX according to `roles`.
    fn open(
        &mut self,
        transport: TransportId,
        config: UartConfig,
        roles: PinRoles,
    ) -> Result<Self::Transport, Self::Error>;

    /// Release the UART so another candidate can use the same pins.
    fn close(&mut self, transport: Self::Transport);

    /// Returns `true` if the module answered the protocol handshake.
    fn handshake(&mut self, transport: &mut Self::Transport) -> bool;

    /// Start playing the track with the given index.
    fn play(&mut self, transport: &mut Self::Transport, track: TrackIndex)
        -> Result<(), Self::Error>;

    /// Stop playback.
    fn stop(&mut self, transport: &mut Self::Transport) -> Result<(), Self::Error>;

    /// Set output volume (0–30).
    fn set_volume(
        &mut self,
        transport: &mut Self::Transport,
        volume: Volume,
    ) -> Result<(), Self::Error>;
}
