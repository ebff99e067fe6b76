//! Audio module discovery state machine.
//!
//! Walks a list of [`TransportCandidate`]s, opening each one, waiting for the
//! module to settle and attempting the protocol handshake.
//!
//! ```text
//! [Idle] --run()--> [Probing { candidate, attempt }] --handshake ok--> [Ready]
//!                              |
//!                              +--list exhausted--> [Exhausted]
//! ```
//!
//! `Ready` and `Exhausted` are both re-enterable: every [`Discovery::run`]
//! starts again from the first candidate, clears the diagnostic log and
//! rewrites it as it goes. The lines it writes form the log's pinned report.
//!
//! Settle delays are blocking (`embedded_hal::delay::DelayNs`). Discovery is
//! rare and never on a latency-critical path; a cooperative delay can be
//! plugged in through the same trait.

use embedded_hal::delay::DelayNs;
use platform::config::SETTLE_DELAY_MS;
use platform::{AudioModule, Volume};

use crate::candidates::TransportCandidate;
use crate::diagnostics::{DiagnosticLog, Severity};

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscoveryState {
    /// Never run, or reset by reinit
    Idle,
    /// Handshaking with `candidate` (index into the list), try `attempt` (1-based)
    Probing {
        /// Index into the candidate list
        candidate: usize,
        /// 1-based handshake try on that candidate
        attempt: u8,
    },
    /// The module answered on this candidate
    Ready(TransportCandidate),
    /// No candidate answered
    Exhausted,
}

/// Result of one discovery run.
#[derive(Debug)]
pub enum DiscoveryOutcome<T> {
    /// The module answered; `transport` is left open for the caller.
    Ready {
        /// Winning wiring
        candidate: TransportCandidate,
        /// Open channel to the module
        transport: T,
    },
    /// Every candidate was tried without an answer.
    Exhausted,
}

impl<T> DiscoveryOutcome<T> {
    /// Returns `true` if a module was found.
    pub fn success(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Winning candidate, if any.
    pub fn candidate(&self) -> Option<TransportCandidate> {
        match self {
            Self::Ready { candidate, .. } => Some(*candidate),
            Self::Exhausted => None,
        }
    }
}

/// Discovery state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovery {
    state: DiscoveryState,
    settle_ms: u32,
    runs: u32,
}

impl Discovery {
    /// Idle machine using the board's settle delay.
    pub const fn new() -> Self {
        Self::with_settle_delay(SETTLE_DELAY_MS)
    }

    /// Idle machine waiting `settle_ms` before each handshake.
    pub const fn with_settle_delay(settle_ms: u32) -> Self {
        Self {
            state: DiscoveryState::Idle,
            settle_ms,
            runs: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    /// Number of times [`run`](Self::run) was called (saturating).
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Back to `Idle` without touching any hardware.
    pub fn reset(&mut self) {
        self.state = DiscoveryState::Idle;
    }

    /// Try `candidates` in order until the module answers.
    ///
    /// Starts a fresh report in `log` and finishes it before returning, so
    /// the lines written here stay pinned while later commands append. On
    /// success the configured `volume` is applied and
    /// the open transport is returned; all other transports are closed. Always
    /// runs to completion.
    #[allow(clippy::use_debug)] // driver errors are only `Debug`
    pub fn run<M, D, const LINES: usize, const WIDTH: usize>(
        &mut self,
        module: &mut M,
        delay: &mut D,
        candidates: &[TransportCandidate],
        volume: Volume,
        log: &mut DiagnosticLog<LINES, WIDTH>,
    ) -> DiscoveryOutcome<M::Transport>
    where
        M: AudioModule,
        D: DelayNs,
    {
        self.runs = self.runs.saturating_add(1);
        log.start_report();
        log.push(Severity::Info, format_args!("Initializing audio module..."));

        for (index, candidate) in candidates.iter().enumerate() {
            let Some(mut transport) = self.try_candidate(index, candidate, module, delay, log)
            else {
                continue;
            };

            self.state = DiscoveryState::Ready(*candidate);
            if let Err(e) = module.set_volume(&mut transport, volume) {
                log.push(
                    Severity::Warn,
                    format_args!("Could not apply volume {volume}: {e:?}"),
                );
            }
            log.push(
                Severity::Ok,
                format_args!("Audio module ready on {candidate}, volume {volume}"),
            );
            log.finish_report();
            return DiscoveryOutcome::Ready {
                candidate: *candidate,
                transport,
            };
        }

        log.push(
            Severity::Error,
            format_args!(
                "Audio module not found on any of {} wirings. Check wiring: module TX -> board RX, \
                 module RX -> board TX, common GND, 5V on module VCC",
                candidates.len()
            ),
        );
        log.finish_report();
        self.state = DiscoveryState::Exhausted;
        DiscoveryOutcome::Exhausted
    }

    /// Open one candidate and handshake up to `attempts` times.
    ///
    /// Returns the open transport if the module answered; otherwise the
    /// transport has been closed.
    #[allow(clippy::use_debug)]
    fn try_candidate<M, D, const LINES: usize, const WIDTH: usize>(
        &mut self,
        index: usize,
        candidate: &TransportCandidate,
        module: &mut M,
        delay: &mut D,
        log: &mut DiagnosticLog<LINES, WIDTH>,
    ) -> Option<M::Transport>
    where
        M: AudioModule,
        D: DelayNs,
    {
        self.state = DiscoveryState::Probing {
            candidate: index,
            attempt: 1,
        };

        let mut transport =
            match module.open(candidate.transport, candidate.uart_config(), candidate.roles) {
                Ok(transport) => transport,
                Err(e) => {
                    log.push(
                        Severity::Warn,
                        format_args!("Trying {candidate}: port unavailable ({e:?})"),
                    );
                    return None;
                }
            };

        let attempts = candidate.attempts.max(1);
        for attempt in 1..=attempts {
            self.state = DiscoveryState::Probing {
                candidate: index,
                attempt,
            };
            delay.delay_ms(self.settle_ms);
            if module.handshake(&mut transport) {
                log.push(
                    Severity::Ok,
                    format_args!("Trying {candidate} [{attempt}/{attempts}]: module responded"),
                );
                return Some(transport);
            }
            log.push(
                Severity::Warn,
                format_args!("Trying {candidate} [{attempt}/{attempts}]: no response"),
            );
        }

        module.close(transport);
        None
    }
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new()
    }
}
