//! Wiring candidates tried during audio module discovery.
//!
//! The module can end up on either hardware UART, with RX and TX possibly
//! crossed, or (on some boards) on the USB console pins. The default list
//! below encodes how likely each wiring is in the field, most likely first;
//! discovery walks it in order and stops at the first module that answers, so
//! reordering it changes which port wins when more than one would respond.

use core::fmt;

use platform::config::{MODULE_BAUD, PRIMARY_ATTEMPTS};
use platform::{PinRoles, TransportId, UartConfig};

/// One plausible (channel, pin orientation) wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportCandidate {
    /// Serial channel
    pub transport: TransportId,
    /// Serial rate
    pub baud: u32,
    /// RX/TX orientation
    pub roles: PinRoles,
    /// Handshake tries before moving on (at least 1)
    pub attempts: u8,
}

impl TransportCandidate {
    /// Candidate at the module's baud rate with a single handshake try.
    pub const fn new(transport: TransportId, roles: PinRoles) -> Self {
        Self {
            transport,
            baud: MODULE_BAUD,
            roles,
            attempts: 1,
        }
    }

    /// Same candidate with `attempts` handshake tries (0 is treated as 1).
    #[must_use]
    pub const fn with_attempts(self, attempts: u8) -> Self {
        Self {
            attempts: if attempts == 0 { 1 } else { attempts },
            ..self
        }
    }

    /// UART framing to open this candidate with.
    pub const fn uart_config(&self) -> UartConfig {
        UartConfig::eight_n_one(self.baud)
    }
}

/// `UART2 (RX=16, TX=17, normal)`; USB serial has fixed pins so only its name
/// is shown.
impl fmt::Display for TransportCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transport {
            TransportId::UsbSerial => f.write_str(self.transport.name()),
            transport => {
                let (rx, tx) = self.roles.pins();
                write!(f, "{transport} (RX={rx}, TX={tx}, {})", self.roles)
            }
        }
    }
}

/// Probing order used by the firmware. Do not reorder.
pub const DEFAULT_CANDIDATES: [TransportCandidate; 5] = [
    TransportCandidate::new(TransportId::Uart2, PinRoles::Normal).with_attempts(PRIMARY_ATTEMPTS),
    TransportCandidate::new(TransportId::Uart2, PinRoles::Swapped),
    TransportCandidate::new(TransportId::Uart1, PinRoles::Normal),
    TransportCandidate::new(TransportId::Uart1, PinRoles::Swapped),
    TransportCandidate::new(TransportId::UsbSerial, PinRoles::Normal),
];
