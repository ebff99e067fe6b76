//! Errors surfaced by the playback controller.

/// Failure of a playback operation.
///
/// "Module not yet discovered" is never reported: every operation discovers
/// lazily and only reports [`ModuleNotFound`](AudioError::ModuleNotFound) when
/// that discovery is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// No candidate wiring answered the handshake
    ModuleNotFound,
    /// The track token is not a positive decimal index
    InvalidTrack,
    /// The module rejected a command after it was found
    Driver,
}

impl AudioError {
    /// Short stable identifier, suitable for machine-readable responses.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModuleNotFound => "module_not_found",
            Self::InvalidTrack => "invalid_track",
            Self::Driver => "driver",
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AudioError {}

impl core::fmt::Display for AudioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ModuleNotFound => write!(f, "Audio module not found"),
            Self::InvalidTrack => write!(f, "Invalid track index"),
            Self::Driver => write!(f, "Audio module command failed"),
        }
    }
}
