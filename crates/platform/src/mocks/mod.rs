//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::{AudioModule, PinRoles, TrackIndex, TransportId, UartConfig, Volume};

/// Driver call recorded by [`MockAudioModule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleCall {
    /// `open` was called
    Open {
        /// Channel
        transport: TransportId,
        /// Pin orientation
        roles: PinRoles,
        /// Requested rate
        baud: u32,
    },
    /// `open` was called on an unavailable channel and failed
    OpenRejected(TransportId),
    /// `close` was called for a transport
    Close(TransportId),
    /// `handshake` was called; `answered` is what the mock returned
    Handshake {
        /// Channel
        transport: TransportId,
        /// Pin orientation
        roles: PinRoles,
        /// Mock reply
        answered: bool,
    },
    /// `play` with the raw track index
    Play(u32),
    /// `stop`
    Stop,
    /// `set_volume` with the raw level
    SetVolume(u8),
}

/// Error returned by the mock when told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockModuleError {
    /// The UART could not be opened
    OpenFailed,
    /// The module rejected a command
    CommandFailed,
}

/// Open channel handed out by [`MockAudioModule`].
#[derive(Debug, PartialEq, Eq)]
pub struct MockTransport {
    /// Channel
    pub transport: TransportId,
    /// Pin orientation
    pub roles: PinRoles,
}

/// Mock audio module. Answers only on the wirings it is told about and
/// records all calls for test assertions.
#[derive(Debug, Default)]
pub struct MockAudioModule {
    /// Wirings on which the handshake succeeds
    pub responding: Vec<(TransportId, PinRoles)>,
    /// Handshakes that fail before a responding wiring starts answering
    pub slow_boot_handshakes: u8,
    /// Channels whose `open` returns an error
    pub unavailable: Vec<TransportId>,
    /// When set, play/stop/set_volume return an error
    pub fail_commands: bool,
    /// Every driver call in order
    pub calls: Vec<ModuleCall>,
}

impl MockAudioModule {
    /// Module that never answers (nothing wired).
    pub fn new() -> Self {
        Self::default()
    }

    /// Module that answers on exactly one wiring.
    pub fn responding_on(transport: TransportId, roles: PinRoles) -> Self {
        Self {
            responding: std::vec![(transport, roles)],
            ..Self::default()
        }
    }

    /// Handshake attempts in call order as `(transport, roles, answered)`.
    pub fn handshakes(&self) -> Vec<(TransportId, PinRoles, bool)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                ModuleCall::Handshake {
                    transport,
                    roles,
                    answered,
                } => Some((transport, roles, answered)),
                _ => None,
            })
            .collect()
    }

    /// Number of `open` calls that have no matching `close` yet.
    pub fn open_transports(&self) -> usize {
        let opened = self
            .calls
            .iter()
            .filter(|c| matches!(c, ModuleCall::Open { .. }))
            .count();
        let closed = self
            .calls
            .iter()
            .filter(|c| matches!(c, ModuleCall::Close(_)))
            .count();
        opened.saturating_sub(closed)
    }

    /// Last volume written to the module, if any.
    pub fn last_volume(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|call| match *call {
            ModuleCall::SetVolume(level) => Some(level),
            _ => None,
        })
    }

    /// Forget recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn command(&mut self, call: ModuleCall) -> Result<(), MockModuleError> {
        self.calls.push(call);
        if self.fail_commands {
            Err(MockModuleError::CommandFailed)
        } else {
            Ok(())
        }
    }
}

impl AudioModule for MockAudioModule {
    type Transport = MockTransport;
    type Error = MockModuleError;

    fn open(
        &mut self,
        transport: TransportId,
        config: UartConfig,
        roles: PinRoles,
    ) -> Result<Self::Transport, Self::Error> {
        if self.unavailable.contains(&transport) {
            self.calls.push(ModuleCall::OpenRejected(transport));
            return Err(MockModuleError::OpenFailed);
        }
        self.calls.push(ModuleCall::Open {
            transport,
            roles,
            baud: config.baud_rate,
        });
        Ok(MockTransport { transport, roles })
    }

    fn close(&mut self, transport: Self::Transport) {
        self.calls.push(ModuleCall::Close(transport.transport));
    }

    fn handshake(&mut self, transport: &mut Self::Transport) -> bool {
        let wired = self
            .responding
            .contains(&(transport.transport, transport.roles));
        let answered = if wired && self.slow_boot_handshakes > 0 {
            self.slow_boot_handshakes = self.slow_boot_handshakes.saturating_sub(1);
            false
        } else {
            wired
        };
        self.calls.push(ModuleCall::Handshake {
            transport: transport.transport,
            roles: transport.roles,
            answered,
        });
        answered
    }

    fn play(
        &mut self,
        _transport: &mut Self::Transport,
        track: TrackIndex,
    ) -> Result<(), Self::Error> {
        self.command(ModuleCall::Play(track.get()))
    }

    fn stop(&mut self, _transport: &mut Self::Transport) -> Result<(), Self::Error> {
        self.command(ModuleCall::Stop)
    }

    fn set_volume(
        &mut self,
        _transport: &mut Self::Transport,
        volume: Volume,
    ) -> Result<(), Self::Error> {
        self.command(ModuleCall::SetVolume(volume.get()))
    }
}

/// Delay that returns immediately and remembers how long it was asked to wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockDelay {
    /// Sum of all requested delays in nanoseconds
    pub total_ns: u64,
    /// Number of delay calls
    pub calls: usize,
}

impl MockDelay {
    /// Create new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in whole milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns = self.total_ns.saturating_add(u64::from(ns));
        self.calls = self.calls.saturating_add(1);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns = self
            .total_ns
            .saturating_add(u64::from(ms).saturating_mul(1_000_000));
        self.calls = self.calls.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(module: &mut MockAudioModule, id: TransportId, roles: PinRoles) -> MockTransport {
        module
            .open(id, UartConfig::eight_n_one(9600), roles)
            .unwrap()
    }

    #[test]
    fn test_mock_module_answers_only_when_wired() {
        let mut module = MockAudioModule::responding_on(TransportId::Uart1, PinRoles::Swapped);

        let mut wrong = open(&mut module, TransportId::Uart1, PinRoles::Normal);
        assert!(!module.handshake(&mut wrong));
        module.close(wrong);

        let mut right = open(&mut module, TransportId::Uart1, PinRoles::Swapped);
        assert!(module.handshake(&mut right));
        assert_eq!(module.open_transports(), 1);
    }

    #[test]
    fn test_mock_module_slow_boot() {
        let mut module = MockAudioModule::responding_on(TransportId::Uart2, PinRoles::Normal);
        module.slow_boot_handshakes = 1;

        let mut t = open(&mut module, TransportId::Uart2, PinRoles::Normal);
        assert!(!module.handshake(&mut t));
        assert!(module.handshake(&mut t));
    }

    #[test]
    fn test_mock_module_unavailable_port() {
        let mut module = MockAudioModule::new();
        module.unavailable.push(TransportId::UsbSerial);

        let result = module.open(
            TransportId::UsbSerial,
            UartConfig::eight_n_one(9600),
            PinRoles::Normal,
        );
        assert_eq!(result, Err(MockModuleError::OpenFailed));
        assert_eq!(module.open_transports(), 0);
    }

    #[test]
    fn test_mock_module_commands() {
        let mut module = MockAudioModule::responding_on(TransportId::Uart2, PinRoles::Normal);
        let mut t = open(&mut module, TransportId::Uart2, PinRoles::Normal);

        module.set_volume(&mut t, Volume::clamped(12)).unwrap();
        module.play(&mut t, TrackIndex::new(3).unwrap()).unwrap();
        module.stop(&mut t).unwrap();

        assert_eq!(module.last_volume(), Some(12));
        assert!(module.calls.contains(&ModuleCall::Play(3)));
        assert_eq!(module.calls.last(), Some(&ModuleCall::Stop));

        module.fail_commands = true;
        assert_eq!(module.stop(&mut t), Err(MockModuleError::CommandFailed));
    }

    #[test]
    fn test_mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_ms(200);
        delay.delay_ms(50);
        delay.delay_us(1_000);
        assert_eq!(delay.total_ms(), 251);
    }
}
