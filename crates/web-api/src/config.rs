//! Simulator configuration, read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `DIORAMA_BIND` | `127.0.0.1:8080` | HTTP listen address |
//! | `DIORAMA_SIM_WIRING` | `uart2` | Wiring the simulated module answers on: `uart2`, `uart2-swapped`, `uart1`, `uart1-swapped`, `usb` or `none` |
//! | `DIORAMA_SIM_SETTLE_MS` | `200` | Settle delay before each handshake |

use std::net::SocketAddr;

use platform::config::SETTLE_DELAY_MS;
use platform::{PinRoles, TransportId};
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Invalid environment value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `DIORAMA_BIND` is not a socket address
    #[error("Invalid bind address '{0}'")]
    Bind(String),
    /// `DIORAMA_SIM_WIRING` is not a known wiring
    #[error("Unknown wiring '{0}' (expected uart2, uart2-swapped, uart1, uart1-swapped, usb or none)")]
    Wiring(String),
    /// `DIORAMA_SIM_SETTLE_MS` is not a number of milliseconds
    #[error("Invalid settle delay '{0}'")]
    SettleDelay(String),
}

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// HTTP listen address
    pub bind: SocketAddr,
    /// Wiring the simulated module answers on; `None` simulates a missing module
    pub wiring: Option<(TransportId, PinRoles)>,
    /// Settle delay before each handshake
    pub settle_ms: u32,
}

impl SimConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("DIORAMA_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind = bind.parse().map_err(|_| ConfigError::Bind(bind))?;

        let wiring = match lookup("DIORAMA_SIM_WIRING") {
            Some(name) => parse_wiring(&name).ok_or(ConfigError::Wiring(name))?,
            None => Some((TransportId::Uart2, PinRoles::Normal)),
        };

        let settle_ms = match lookup("DIORAMA_SIM_SETTLE_MS") {
            Some(ms) => ms.trim().parse().map_err(|_| ConfigError::SettleDelay(ms))?,
            None => SETTLE_DELAY_MS,
        };

        Ok(Self {
            bind,
            wiring,
            settle_ms,
        })
    }
}

/// Parse a wiring name. `Some(None)` is the explicit "no module" wiring.
pub fn parse_wiring(name: &str) -> Option<Option<(TransportId, PinRoles)>> {
    let wiring = match name.trim().to_ascii_lowercase().as_str() {
        "uart2" => (TransportId::Uart2, PinRoles::Normal),
        "uart2-swapped" => (TransportId::Uart2, PinRoles::Swapped),
        "uart1" => (TransportId::Uart1, PinRoles::Normal),
        "uart1-swapped" => (TransportId::Uart1, PinRoles::Swapped),
        "usb" => (TransportId::UsbSerial, PinRoles::Normal),
        "none" => return Some(None),
        _ => return None,
    };
    Some(Some(wiring))
}
