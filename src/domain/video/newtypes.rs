// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

use std::fmt;

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0, where 1.0 = 100%).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Default volume level.
    pub const DEFAULT: f32 = 0.8;
    /// Volume adjustment step per key press (10%).
    pub const STEP: f32 = 0.1;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// Volume is independent from the mute flag: muting never rewrites
/// the stored level, so un-muting restores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    ///
    /// A NaN input is treated as silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(volume_bounds::MIN);
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if the level is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 <= volume_bounds::MIN
    }

    /// Raises the level by `step`, clamping to maximum.
    #[must_use]
    pub fn raised_by(self, step: f32) -> Self {
        Self::new(self.0 + step)
    }

    /// Lowers the level by `step`, clamping to minimum.
    #[must_use]
    pub fn lowered_by(self, step: f32) -> Self {
        Self::new(self.0 - step)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

/// Coarse loudness bucket used to pick the volume glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

impl VolumeLevel {
    /// Derives the bucket from the stored level and the mute flag.
    #[must_use]
    pub fn from_state(volume: Volume, muted: bool) -> Self {
        if muted || volume.is_zero() {
            Self::Muted
        } else if volume.value() < 0.5 {
            Self::Low
        } else {
            Self::High
        }
    }
}

// =============================================================================
// PlaybackRate
// =============================================================================

/// The playback rates offered by the settings menu, slowest first.
pub const PLAYBACK_RATES: [f64; 7] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Playback rate, always one of [`PLAYBACK_RATES`].
///
/// Arbitrary values are snapped to the nearest entry of the set, so an
/// out-of-set rate cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Normal speed.
    pub const NORMAL: Self = Self(1.0);

    /// Returns the rate if `rate` is exactly one of the presets.
    #[must_use]
    pub fn exact(rate: f64) -> Option<Self> {
        PLAYBACK_RATES
            .iter()
            .find(|&&r| (r - rate).abs() < 1e-9)
            .map(|&r| Self(r))
    }

    /// Snaps `rate` to the nearest preset. Ties resolve to the slower rate.
    ///
    /// Returns `None` for non-finite input, which has no meaningful nearest preset.
    #[must_use]
    pub fn nearest(rate: f64) -> Option<Self> {
        if !rate.is_finite() {
            return None;
        }
        let mut best = PLAYBACK_RATES[0];
        for &candidate in &PLAYBACK_RATES[1..] {
            if (candidate - rate).abs() < (best - rate).abs() {
                best = candidate;
            }
        }
        Some(Self(best))
    }

    /// Returns the rate as a multiplier.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Menu label: `Normal` for 1x, `<rate>x` otherwise.
    #[must_use]
    pub fn label(self) -> String {
        if (self.0 - 1.0).abs() < 1e-9 {
            "Normal".to_string()
        } else {
            format!("{}x", self.0)
        }
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

// =============================================================================
// PlayedFraction
// =============================================================================

/// Upper bound of the played fraction; the scrubber never reaches exactly 1.
pub const MAX_PLAYED_FRACTION: f64 = 0.999_999;

/// Playback position as a fraction of the duration, clamped to `[0, 0.999999]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayedFraction(f64);

impl PlayedFraction {
    /// Start of the media.
    pub const START: Self = Self(0.0);

    /// Creates a fraction, clamping to the valid range. NaN maps to the start.
    #[must_use]
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::START;
        }
        Self(fraction.clamp(0.0, MAX_PLAYED_FRACTION))
    }

    /// Fraction matching `seconds` within a media of `duration` seconds.
    #[must_use]
    pub fn from_seconds(seconds: f64, duration: f64) -> Self {
        if duration <= 0.0 {
            return Self::START;
        }
        Self::new(seconds / duration)
    }

    /// Returns the raw fraction.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Absolute position in seconds for a media of `duration` seconds.
    #[must_use]
    pub fn seconds(self, duration: f64) -> f64 {
        duration * self.0
    }

    /// Returns true if the fraction sits at the upper clamp.
    #[must_use]
    pub fn is_at_end(self) -> bool {
        self.0 >= MAX_PLAYED_FRACTION
    }
}

// =============================================================================
// KeyboardSeekStep
// =============================================================================

/// Keyboard seek step bounds (0.5 to 30.0 seconds).
pub mod seek_step_bounds {
    /// Minimum keyboard seek step in seconds.
    pub const MIN: f64 = 0.5;
    /// Maximum keyboard seek step in seconds.
    pub const MAX: f64 = 30.0;
    /// Default keyboard seek step in seconds.
    pub const DEFAULT: f64 = 5.0;
}

/// Keyboard seek step in seconds for the arrow-key shortcuts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardSeekStep(f64);

impl KeyboardSeekStep {
    /// Creates a new keyboard seek step value, clamping to valid range.
    ///
    /// A NaN input falls back to the default step.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(seek_step_bounds::MIN, seek_step_bounds::MAX))
    }

    /// Returns the value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for KeyboardSeekStep {
    fn default() -> Self {
        Self(seek_step_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
