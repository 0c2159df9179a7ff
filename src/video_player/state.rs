// SPDX-License-Identifier: MPL-2.0
//! Playback state store.
//!
//! [`PlaybackState`] is the single record describing a playback session:
//! transport state mirrored from the media engine plus the overlay flags
//! the controls render from. [`Store`] owns it, applies partial updates and
//! notifies subscribers after every change that actually altered the record.
//!
//! Engine progress and the user's scrub gesture both write the position.
//! The `seeking` flag arbitrates: while it is set, engine progress leaves the
//! played fraction alone so the scrubber does not jump back under the pointer.

use super::time_units::format_time;
use crate::domain::video::{PlaybackRate, PlayedFraction, Volume, VolumeLevel};
use tokio::sync::watch;

/// Snapshot of a playback session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Engine should be actively decoding and rendering.
    pub playing: bool,
    /// Output level, independent from `muted`.
    pub volume: Volume,
    /// Audible output suppressed without resetting `volume`.
    pub muted: bool,
    /// Position as a fraction of `duration`.
    pub played: PlayedFraction,
    /// Buffered share of the media reported by the engine (display only).
    pub loaded: f64,
    /// A scrub gesture is in progress.
    pub seeking: bool,
    /// Media duration in seconds, 0 until the engine reports it.
    pub duration: f64,
    pub rate: PlaybackRate,
    /// Picture-in-picture, as confirmed by the platform.
    pub pip: bool,
    /// Fullscreen, as confirmed by the platform.
    pub fullscreen: bool,
    pub controls_visible: bool,
    pub settings_open: bool,
}

impl PlaybackState {
    /// State of a freshly opened session.
    #[must_use]
    pub fn initial(volume: Volume, autoplay: bool) -> Self {
        Self {
            playing: autoplay,
            volume,
            ..Self::default()
        }
    }

    /// Absolute position in seconds.
    #[must_use]
    pub fn position_secs(&self) -> f64 {
        self.played.seconds(self.duration)
    }

    /// Returns true once the engine has reported a usable duration.
    #[must_use]
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Clock label, e.g. `1:05 / 2:00`.
    #[must_use]
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.position_secs()),
            format_time(self.duration)
        )
    }

    /// Which volume glyph the controls should show.
    #[must_use]
    pub fn volume_level(&self) -> VolumeLevel {
        VolumeLevel::from_state(self.volume, self.muted)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            volume: Volume::default(),
            muted: false,
            played: PlayedFraction::START,
            loaded: 0.0,
            seeking: false,
            duration: 0.0,
            rate: PlaybackRate::NORMAL,
            pip: false,
            fullscreen: false,
            controls_visible: true,
            settings_open: false,
        }
    }
}

/// Owner of the session's [`PlaybackState`].
///
/// Every mutation is a transform of the previous state; subscribers
/// obtained through [`Store::subscribe`] see each resulting state.
#[derive(Debug)]
pub struct Store {
    tx: watch::Sender<PlaybackState>,
}

impl Store {
    pub fn new(initial: PlaybackState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        *self.tx.borrow()
    }

    /// Returns a receiver that is notified after every effective change.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.tx.subscribe()
    }

    /// Applies `transform` and notifies subscribers if anything changed.
    ///
    /// Returns true if the state changed.
    pub fn update(&mut self, transform: impl FnOnce(&mut PlaybackState)) -> bool {
        self.tx.send_if_modified(|state| {
            let before = *state;
            transform(state);
            *state != before
        })
    }

    // ------------------------------------------------------------------
    // Engine confirmations
    // ------------------------------------------------------------------

    /// Periodic engine progress.
    ///
    /// The played fraction is only taken while no scrub is in progress;
    /// the buffered share is always recorded.
    pub fn apply_engine_progress(&mut self, played: f64, loaded: f64) -> bool {
        self.update(|state| {
            if !state.seeking {
                state.played = PlayedFraction::new(played);
            }
            if loaded.is_finite() {
                state.loaded = loaded.clamp(0.0, 1.0);
            }
        })
    }

    /// The engine resolved the media duration.
    pub fn apply_engine_duration(&mut self, seconds: f64) -> bool {
        if !seconds.is_finite() || seconds < 0.0 {
            tracing::debug!(seconds, "ignoring invalid duration report");
            return false;
        }
        self.update(|state| state.duration = seconds)
    }

    /// Playback reached the end. The position stays where it is.
    pub fn apply_engine_ended(&mut self) -> bool {
        self.update(|state| state.playing = false)
    }

    /// The platform entered or left picture-in-picture.
    pub fn apply_engine_pip_changed(&mut self, active: bool) -> bool {
        self.update(|state| state.pip = active)
    }

    /// The platform entered or left fullscreen.
    pub fn apply_engine_fullscreen_changed(&mut self, active: bool) -> bool {
        self.update(|state| state.fullscreen = active)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(PlaybackState::default())
    }
}
