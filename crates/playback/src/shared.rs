//! Mutex-guarded player handle.
//!
//! Request handlers and firmware tasks may call into the player from
//! different contexts. [`SharedAudioPlayer`] puts the whole [`AudioPlayer`]
//! behind one `embassy_sync` blocking mutex, so every operation (including a
//! discovery with its settle delays) runs to completion before the next one
//! starts, and diagnostics are copied out under the same lock.
//!
//! Pick the raw mutex for the target:
//!
//! - `ThreadModeRawMutex` when all callers run in thread mode
//! - `CriticalSectionRawMutex` when callers can preempt each other
//!   (interrupt executors, host threads in tests)
//!
//! # Example
//!
//! ```ignore
//! static PLAYER: StaticCell<SharedAudioPlayer<CriticalSectionRawMutex, Dfplayer, Delay>> =
//!     StaticCell::new();
//!
//! let player = PLAYER.init(SharedAudioPlayer::new(AudioPlayer::new(dfplayer, delay)));
//! player.play("/003.mp3")?;
//! ```

use core::cell::RefCell;
use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::delay::DelayNs;
use platform::{AudioModule, TrackIndex, Volume};

use crate::controller::{AudioPlayer, PlayerStatus};
use crate::error::AudioError;

/// [`AudioPlayer`] behind a blocking mutex.
pub struct SharedAudioPlayer<R: RawMutex, M: AudioModule, D: DelayNs> {
    inner: Mutex<R, RefCell<AudioPlayer<M, D>>>,
}

impl<R: RawMutex, M: AudioModule, D: DelayNs> SharedAudioPlayer<R, M, D> {
    /// Wrap `player`.
    pub const fn new(player: AudioPlayer<M, D>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(player)),
        }
    }

    /// Run `f` with exclusive access to the player.
    ///
    /// `f` must not call back into this handle.
    pub fn with<T>(&self, f: impl FnOnce(&mut AudioPlayer<M, D>) -> T) -> T {
        self.inner.lock(|cell| f(&mut *cell.borrow_mut()))
    }

    /// See [`AudioPlayer::ensure_ready`].
    pub fn ensure_ready(&self) -> Result<(), AudioError> {
        self.with(AudioPlayer::ensure_ready)
    }

    /// See [`AudioPlayer::play`].
    pub fn play(&self, token: &str) -> Result<TrackIndex, AudioError> {
        self.with(|player| player.play(token))
    }

    /// See [`AudioPlayer::stop`].
    pub fn stop(&self) {
        self.with(AudioPlayer::stop);
    }

    /// See [`AudioPlayer::set_volume`].
    pub fn set_volume(&self, level: i32) -> Result<Volume, AudioError> {
        self.with(|player| player.set_volume(level))
    }

    /// See [`AudioPlayer::volume`].
    pub fn volume(&self) -> Volume {
        self.with(|player| player.volume())
    }

    /// See [`AudioPlayer::is_playing`].
    pub fn is_playing(&self) -> bool {
        self.with(|player| player.is_playing())
    }

    /// See [`AudioPlayer::is_ready`].
    pub fn is_ready(&self) -> bool {
        self.with(|player| player.is_ready())
    }

    /// See [`AudioPlayer::status`].
    pub fn status(&self) -> PlayerStatus {
        self.with(|player| player.status())
    }

    /// See [`AudioPlayer::reinit`].
    pub fn reinit(&self) -> Result<(), AudioError> {
        self.with(AudioPlayer::reinit)
    }

    /// Copy the diagnostic log into `out` without releasing the lock in
    /// between lines.
    pub fn write_diagnostics<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.with(|player| write!(out, "{}", player.diagnostics()))
    }

    /// Unwrap the player.
    pub fn into_inner(self) -> AudioPlayer<M, D> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
    use platform::mocks::{MockAudioModule, MockDelay};
    use platform::{PinRoles, TransportId};

    fn shared<R: RawMutex>() -> SharedAudioPlayer<R, MockAudioModule, MockDelay> {
        SharedAudioPlayer::new(AudioPlayer::new(
            MockAudioModule::responding_on(TransportId::Uart2, PinRoles::Normal),
            MockDelay::new(),
        ))
    }

    #[test]
    fn test_delegates_to_player() {
        let player = shared::<NoopRawMutex>();
        assert_eq!(player.play("/002.mp3").map(TrackIndex::get), Ok(2));
        assert!(player.is_playing());
        player.stop();
        assert!(!player.is_playing());
        assert_eq!(player.set_volume(31), Ok(Volume::MAX));
        assert_eq!(player.volume(), Volume::MAX);
    }

    #[test]
    fn test_write_diagnostics_copies_log() {
        let player = shared::<NoopRawMutex>();
        player.ensure_ready().unwrap();

        let mut text = String::new();
        player.write_diagnostics(&mut text).unwrap();
        assert!(text.starts_with("[INFO] Initializing audio module...\n"));
        assert!(text.ends_with("volume 20\n"));
    }

    #[test]
    fn test_threads_share_one_discovery() {
        let player = shared::<CriticalSectionRawMutex>();

        std::thread::scope(|s| {
            for n in 1..=4 {
                let player = &player;
                s.spawn(move || player.play(&n.to_string()));
            }
        });

        let inner = player.into_inner();
        assert_eq!(inner.discovery_runs(), 1);
        assert!(inner.is_playing());
        assert_eq!(inner.module().handshakes().len(), 1);
    }
}
