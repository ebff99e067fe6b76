//! REST error type.

use playback::AudioError;
use thiserror::Error;

/// Failure of a REST request, rendered as `{"error": "<message>"}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Required query parameter absent
    #[error("Missing '{0}' param")]
    MissingParam(&'static str),

    /// `path` does not name a playable track
    #[error("Invalid track '{0}'; use numeric index like /api/sd/play?path=/001.mp3 or /api/sd/play?path=1")]
    InvalidTrack(String),

    /// `level` is not an integer in range
    #[error("level must be between {min} and {max}")]
    InvalidVolume {
        /// Lowest accepted level
        min: u8,
        /// Highest accepted level
        max: u8,
    },

    /// The controller could not start playback
    #[error("Failed to start playback: {0}")]
    Playback(#[from] AudioError),

    /// No handler for the path
    #[error("API route not found")]
    NotFound,

    /// The request could not be completed for reasons unrelated to input
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingParam(_) | Self::InvalidTrack(_) | Self::InvalidVolume { .. } => 400,
            Self::NotFound => 404,
            Self::Playback(AudioError::InvalidTrack) => 400,
            Self::Playback(_) | Self::Internal(_) => 500,
        }
    }
}
