// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// OverlayTimeout
// =============================================================================

/// Overlay auto-hide timeout bounds (1 to 30 seconds).
pub mod overlay_bounds {
    /// Minimum overlay timeout in seconds.
    pub const MIN: u32 = 1;
    /// Maximum overlay timeout in seconds.
    pub const MAX: u32 = 30;
    /// Default overlay timeout in seconds.
    pub const DEFAULT: u32 = 3;
}

/// Inactivity delay after which the control overlay hides during playback.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–30 seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTimeout(u32);

impl OverlayTimeout {
    /// Creates a new overlay timeout value, clamping to valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(overlay_bounds::MIN, overlay_bounds::MAX))
    }

    /// Returns the value as u32.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the timeout as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for OverlayTimeout {
    fn default() -> Self {
        Self(overlay_bounds::DEFAULT)
    }
}
