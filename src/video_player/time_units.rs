// SPDX-License-Identifier: MPL-2.0
//! Time helpers for playback positions.
//!
//! Provides the clock label shown next to the scrubber and the clamping
//! rule used by relative seeks.

/// Seconds per minute.
const SECS_PER_MINUTE: u64 = 60;

/// Seconds per hour.
const SECS_PER_HOUR: u64 = 3600;

/// Formats a position for display.
///
/// Positions under an hour render as `m:ss`, longer ones as `h:mm:ss`.
/// Non-finite or negative input renders as `00:00`.
///
/// # Examples
///
/// ```
/// use lens_player::video_player::time_units::format_time;
///
/// assert_eq!(format_time(65.4), "1:05");
/// assert_eq!(format_time(3725.0), "1:02:05");
/// assert_eq!(format_time(f64::NAN), "00:00");
/// ```
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    let hours = total / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = total % SECS_PER_MINUTE;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Target of a relative seek: `current + delta`, kept inside `[0, duration]`.
///
/// # Examples
///
/// ```
/// use lens_player::video_player::time_units::relative_seek_target;
///
/// assert_eq!(relative_seek_target(2.0, -5.0, 120.0), 0.0);
/// assert_eq!(relative_seek_target(118.0, 5.0, 120.0), 120.0);
/// ```
#[inline]
#[must_use]
pub fn relative_seek_target(current_secs: f64, delta_secs: f64, duration_secs: f64) -> f64 {
    (current_secs + delta_secs).clamp(0.0, duration_secs.max(0.0))
}
