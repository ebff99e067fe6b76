//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `Volume`: clamps 0–30, the audio module's native volume scale
//! - `TrackIndex`: non-zero track number, the only kind the module can play

use core::num::NonZeroU32;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: i64,
    /// The inclusive minimum allowed value.
    pub min: i64,
    /// The inclusive maximum allowed value.
    pub max: i64,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} outside {}..={}",
            self.value, self.min, self.max
        )
    }
}

// ── Volume ───────────────────────────────────────────────────────────────────

/// Audio module volume, clamped to 0–30.
///
/// Wraps a `u8` with the invariant `0 <= value <= 30`.
/// Construct with [`Volume::clamped`] (clamping, accepts any integer) or
/// [`Volume::try_new`] (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Volume(u8);

impl Volume {
    /// Silence.
    pub const MIN: Self = Self(0);

    /// Loudest level the module accepts.
    pub const MAX: Self = Self(crate::config::MAX_VOLUME);

    /// Level applied until somebody asks for another one.
    pub const DEFAULT: Self = Self(crate::config::DEFAULT_VOLUME);

    /// Create a `Volume`, clamping `level` into 0–30.
    #[must_use]
    pub fn clamped(level: i32) -> Self {
        let clamped = level.clamp(0, i32::from(Self::MAX.0));
        // 0..=30 always fits
        Self(u8::try_from(clamped).unwrap_or(Self::MAX.0))
    }

    /// Create a `Volume`, returning an error if `level` is outside 0–30.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `level < 0` or `level > 30`.
    pub fn try_new(level: i32) -> Result<Self, OutOfRangeError> {
        match u8::try_from(level) {
            Ok(raw) if raw <= Self::MAX.0 => Ok(Self(raw)),
            _ => Err(OutOfRangeError {
                value: i64::from(level),
                min: 0,
                max: i64::from(Self::MAX.0),
            }),
        }
    }

    /// Return the inner volume value (0–30).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl core::fmt::Display for Volume {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── TrackIndex ───────────────────────────────────────────────────────────────

/// Track number as stored on the module's SD card (`/001.mp3` → 1).
///
/// Zero is not a playable index, so it cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct TrackIndex(NonZeroU32);

impl TrackIndex {
    /// Returns `None` for index 0.
    #[must_use]
    pub fn new(index: u32) -> Option<Self> {
        NonZeroU32::new(index).map(Self)
    }

    /// Return the raw index (always >= 1).
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl core::fmt::Display for TrackIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_default_is_twenty() {
        assert_eq!(Volume::default().get(), 20);
    }

    #[test]
    fn test_volume_clamped_extremes() {
        assert_eq!(Volume::clamped(i32::MIN), Volume::MIN);
        assert_eq!(Volume::clamped(i32::MAX), Volume::MAX);
    }

    #[test]
    fn test_out_of_range_display() {
        let err = Volume::try_new(31).unwrap_err();
        assert_eq!(format!("{err}"), "value 31 outside 0..=30");
    }

    #[test]
    fn test_track_index_display() {
        assert_eq!(format!("{}", TrackIndex::new(7).unwrap()), "7");
    }
}
