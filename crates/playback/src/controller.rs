//! Playback controller.
//!
//! [`AudioPlayer`] owns the module driver and keeps the playback state for the
//! lifetime of the device. Readiness is lazy: the first operation that needs
//! the module runs discovery, and later operations reuse the transport it
//! found until [`AudioPlayer::reinit`] throws it away.
//!
//! # State
//!
//! ```text
//! ready   ⇔ an open transport is held
//! playing ⇒ ready
//! volume  ∈ 0..=30, kept across discoveries
//! ```
//!
//! The player is not `Sync`; share it through
//! [`SharedAudioPlayer`](crate::shared::SharedAudioPlayer).

use embedded_hal::delay::DelayNs;
use platform::config::REINIT_QUIESCE_MS;
use platform::{AudioModule, TrackIndex, Volume};

use crate::candidates::{TransportCandidate, DEFAULT_CANDIDATES};
use crate::diagnostics::{DiagnosticLog, Severity};
use crate::discovery::{Discovery, DiscoveryOutcome, DiscoveryState};
use crate::error::AudioError;
use crate::track::track_index;

/// Point-in-time view of the controller, read in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerStatus {
    /// A track was started and not stopped since
    pub playing: bool,
    /// A transport to the module is held
    pub ready: bool,
    /// Stored volume
    pub volume: Volume,
}

/// Serial audio module controller.
pub struct AudioPlayer<M: AudioModule, D: DelayNs> {
    module: M,
    delay: D,
    candidates: &'static [TransportCandidate],
    discovery: Discovery,
    log: DiagnosticLog,
    transport: Option<M::Transport>,
    volume: Volume,
    playing: bool,
}

#[allow(clippy::use_debug)] // driver errors are only `Debug`
impl<M: AudioModule, D: DelayNs> AudioPlayer<M, D> {
    /// Player probing [`DEFAULT_CANDIDATES`]. No hardware is touched until the
    /// first operation.
    pub fn new(module: M, delay: D) -> Self {
        Self::with_candidates(module, delay, &DEFAULT_CANDIDATES)
    }

    /// Player probing `candidates` in order.
    pub fn with_candidates(
        module: M,
        delay: D,
        candidates: &'static [TransportCandidate],
    ) -> Self {
        Self {
            module,
            delay,
            candidates,
            discovery: Discovery::new(),
            log: DiagnosticLog::new(),
            transport: None,
            volume: Volume::DEFAULT,
            playing: false,
        }
    }

    /// Replace the settle delay waited before each handshake.
    #[must_use]
    pub fn with_settle_delay(mut self, settle_ms: u32) -> Self {
        self.discovery = Discovery::with_settle_delay(settle_ms);
        self
    }

    /// Run discovery unless a transport is already held.
    ///
    /// Returns [`AudioError::ModuleNotFound`] when discovery is exhausted; the
    /// diagnostic log then explains what was tried.
    pub fn ensure_ready(&mut self) -> Result<(), AudioError> {
        if self.transport.is_some() {
            return Ok(());
        }
        match self.discovery.run(
            &mut self.module,
            &mut self.delay,
            self.candidates,
            self.volume,
            &mut self.log,
        ) {
            DiscoveryOutcome::Ready { transport, .. } => {
                self.transport = Some(transport);
                Ok(())
            }
            DiscoveryOutcome::Exhausted => Err(AudioError::ModuleNotFound),
        }
    }

    /// Start playing the track named by `token` (`/007.mp3`, `7`, ...).
    ///
    /// The token is validated before any hardware access: an invalid token
    /// returns [`AudioError::InvalidTrack`] and skips lazy discovery, even on
    /// a player that has never been made ready.
    pub fn play(&mut self, token: &str) -> Result<TrackIndex, AudioError> {
        let Some(track) = track_index(token) else {
            self.log.push(
                Severity::Error,
                format_args!("Invalid track \"{token}\": expected a number of 1 or more"),
            );
            return Err(AudioError::InvalidTrack);
        };

        self.ensure_ready()?;
        let transport = self.transport.as_mut().ok_or(AudioError::ModuleNotFound)?;

        match self.module.play(transport, track) {
            Ok(()) => {
                self.playing = true;
                self.log
                    .push(Severity::Ok, format_args!("Playing track {track} ({token})"));
                Ok(track)
            }
            Err(e) => {
                self.log.push(
                    Severity::Error,
                    format_args!("Play track {track} failed: {e:?}"),
                );
                Err(AudioError::Driver)
            }
        }
    }

    /// Stop playback. Does nothing before the module has been found.
    ///
    /// A failing stop command is logged; playback is considered stopped
    /// either way.
    pub fn stop(&mut self) {
        let Some(transport) = self.transport.as_mut() else {
            return;
        };
        match self.module.stop(transport) {
            Ok(()) => self.log.push(Severity::Info, format_args!("Playback stopped")),
            Err(e) => self
                .log
                .push(Severity::Warn, format_args!("Stop command failed: {e:?}")),
        }
        self.playing = false;
    }

    /// Clamp `level` into `0..=30` and store it, then make sure the module
    /// uses it.
    ///
    /// The stored level survives a failed discovery and is applied by the
    /// next successful one.
    pub fn set_volume(&mut self, level: i32) -> Result<Volume, AudioError> {
        let volume = Volume::clamped(level);
        self.volume = volume;

        if self.transport.is_none() {
            // a fresh discovery applies `self.volume` itself
            return match self.ensure_ready() {
                Ok(()) => {
                    self.log
                        .push(Severity::Info, format_args!("Volume set to {volume}"));
                    Ok(volume)
                }
                Err(e) => {
                    self.log.push(
                        Severity::Error,
                        format_args!("Volume {volume} saved, audio module not available"),
                    );
                    Err(e)
                }
            };
        }

        let transport = self.transport.as_mut().ok_or(AudioError::ModuleNotFound)?;
        match self.module.set_volume(transport, volume) {
            Ok(()) => {
                self.log
                    .push(Severity::Info, format_args!("Volume set to {volume}"));
                Ok(volume)
            }
            Err(e) => {
                self.log.push(
                    Severity::Error,
                    format_args!("Setting volume {volume} failed: {e:?}"),
                );
                Err(AudioError::Driver)
            }
        }
    }

    /// Stored volume.
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Returns `true` after a successful play until stop or reinit.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Returns `true` while a transport to the module is held.
    pub fn is_ready(&self) -> bool {
        self.transport.is_some()
    }

    /// Playing flag, readiness and volume together.
    pub fn status(&self) -> PlayerStatus {
        PlayerStatus {
            playing: self.playing,
            ready: self.is_ready(),
            volume: self.volume,
        }
    }

    /// Drop the current transport and run discovery from scratch.
    pub fn reinit(&mut self) -> Result<(), AudioError> {
        self.playing = false;
        if let Some(transport) = self.transport.take() {
            self.module.close(transport);
        }
        self.discovery.reset();
        self.delay.delay_ms(REINIT_QUIESCE_MS);

        let result = self.ensure_ready();
        match result {
            Ok(()) => self.log.push(Severity::Ok, format_args!("Reinit succeeded")),
            Err(_) => self.log.push(Severity::Error, format_args!("Reinit failed")),
        }
        result
    }

    /// Diagnostic log of the latest discovery and the commands since.
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Discovery state machine position.
    pub fn discovery_state(&self) -> DiscoveryState {
        self.discovery.state()
    }

    /// Wiring the module was found on, if it is ready.
    pub fn active_candidate(&self) -> Option<TransportCandidate> {
        match self.discovery.state() {
            DiscoveryState::Ready(candidate) if self.is_ready() => Some(candidate),
            _ => None,
        }
    }

    /// Number of discovery runs since construction.
    pub fn discovery_runs(&self) -> u32 {
        self.discovery.runs()
    }

    /// Underlying driver.
    pub fn module(&self) -> &M {
        &self.module
    }

    /// Underlying driver, mutably.
    pub fn module_mut(&mut self) -> &mut M {
        &mut self.module
    }

    /// Delay provider.
    pub fn delay(&self) -> &D {
        &self.delay
    }
}
