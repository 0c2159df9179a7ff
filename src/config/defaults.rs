// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Playback**: Autoplay and initial volume
//! - **Keyboard**: Seek and volume steps for shortcuts
//! - **Overlay**: Control overlay auto-hide timeout

use crate::domain::ui::newtypes::overlay_bounds;
use crate::domain::video::newtypes::{seek_step_bounds, volume_bounds};

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Whether a freshly opened session starts playing immediately.
pub const DEFAULT_AUTOPLAY: bool = true;

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = volume_bounds::DEFAULT;

// ==========================================================================
// Keyboard Defaults
// ==========================================================================

/// Seconds jumped by ArrowLeft / ArrowRight.
pub const DEFAULT_KEYBOARD_SEEK_STEP_SECS: f64 = seek_step_bounds::DEFAULT;

/// Volume change per ArrowUp / ArrowDown press.
pub const DEFAULT_VOLUME_STEP: f32 = volume_bounds::STEP;

/// Smallest accepted volume step.
pub const MIN_VOLUME_STEP: f32 = 0.01;

/// Largest accepted volume step.
pub const MAX_VOLUME_STEP: f32 = 0.5;

// ==========================================================================
// Overlay/Timeout Defaults
// ==========================================================================

/// Default auto-hide timeout for the control overlay (in seconds).
pub const DEFAULT_OVERLAY_TIMEOUT_SECS: u32 = overlay_bounds::DEFAULT;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_VOLUME >= volume_bounds::MIN);
    assert!(DEFAULT_VOLUME <= volume_bounds::MAX);

    assert!(MIN_VOLUME_STEP > 0.0);
    assert!(MAX_VOLUME_STEP >= MIN_VOLUME_STEP);
    assert!(DEFAULT_VOLUME_STEP >= MIN_VOLUME_STEP);
    assert!(DEFAULT_VOLUME_STEP <= MAX_VOLUME_STEP);

    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS >= seek_step_bounds::MIN);
    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS <= seek_step_bounds::MAX);

    assert!(DEFAULT_OVERLAY_TIMEOUT_SECS >= overlay_bounds::MIN);
    assert!(DEFAULT_OVERLAY_TIMEOUT_SECS <= overlay_bounds::MAX);
};
