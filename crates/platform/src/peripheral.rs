//! Peripheral abstraction layer
//!
//! Serial transport identifiers and UART configuration used to reach the
//! audio module. The board exposes two hardware UARTs and the USB console;
//! any of them may carry the module depending on how it was wired.

use crate::config::{MODULE_RX_PIN, MODULE_TX_PIN};

/// Serial channel the audio module might be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportId {
    /// Hardware UART2, the documented module port
    Uart2,
    /// Hardware UART1, sometimes used when UART2 pins are taken
    Uart1,
    /// USB console serial; only works if the module sits on those pins
    UsbSerial,
}

impl TransportId {
    /// Short human-readable name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uart2 => "UART2",
            Self::Uart1 => "UART1",
            Self::UsbSerial => "USB serial",
        }
    }
}

impl core::fmt::Display for TransportId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which physical pin receives and which transmits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRoles {
    /// RX and TX as labelled on the board
    Normal,
    /// RX and TX exchanged (module TX wired to board TX)
    Swapped,
}

impl PinRoles {
    /// Return `(rx, tx)` GPIO numbers for this orientation.
    pub const fn pins(self) -> (u8, u8) {
        match self {
            Self::Normal => (MODULE_RX_PIN, MODULE_TX_PIN),
            Self::Swapped => (MODULE_TX_PIN, MODULE_RX_PIN),
        }
    }

    /// Short human-readable name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Swapped => "swapped",
        }
    }
}

impl core::fmt::Display for PinRoles {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// UART configuration
///
/// Framing is always 8 data bits, no parity, 1 stop bit: the only format the
/// audio module speaks. Drivers configure it unconditionally and take the
/// rate from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate
    pub baud_rate: u32,
}

impl UartConfig {
    /// 8N1 at the given rate.
    pub const fn eight_n_one(baud_rate: u32) -> Self {
        Self { baud_rate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_exchanges_pins() {
        let (rx, tx) = PinRoles::Normal.pins();
        assert_eq!(PinRoles::Swapped.pins(), (tx, rx));
    }

    #[test]
    fn test_eight_n_one_keeps_rate() {
        assert_eq!(UartConfig::eight_n_one(9600).baud_rate, 9600);
        assert_ne!(UartConfig::eight_n_one(9600), UartConfig::eight_n_one(115_200));
    }
}
