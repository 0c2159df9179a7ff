// SPDX-License-Identifier: MPL-2.0
//! Auto-hide policy for the control overlay.
//!
//! Controls show on any pointer movement and hide after a period of
//! inactivity while the media plays. They never hide while paused (the play
//! button must stay reachable) or while the settings menu is open.
//!
//! The inactivity timer is owned here. Arming replaces the pending timer in
//! one step, and each timer carries a generation number, so an expiry that
//! belongs to a replaced timer is ignored.

use crate::domain::ui::OverlayTimeout;
use crate::video_player::Store;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// Pending inactivity timer.
#[derive(Debug)]
struct PendingHide {
    generation: u64,
    sleep: Pin<Box<Sleep>>,
}

/// Auto-hide controller for one playback session.
#[derive(Debug)]
pub struct AutoHide {
    timeout: Duration,
    pending: Option<PendingHide>,
    /// Generation handed to the most recently armed timer.
    generation: u64,
    /// `(playing, settings_open)` seen by the last [`AutoHide::sync`].
    observed: Option<(bool, bool)>,
}

impl AutoHide {
    pub fn new(timeout: OverlayTimeout) -> Self {
        Self {
            timeout: timeout.as_duration(),
            pending: None,
            generation: 0,
            observed: None,
        }
    }

    /// Returns the generation of the pending timer, if one is armed.
    #[must_use]
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.generation)
    }

    /// Cancels any pending timer and starts a fresh one.
    ///
    /// Must be called from within a Tokio runtime.
    fn arm(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingHide {
            generation: self.generation,
            sleep: Box::pin(sleep(self.timeout)),
        });
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    /// Shows the controls and restarts the inactivity window.
    fn show_and_rearm(&mut self, store: &mut Store) {
        store.update(|s| s.controls_visible = true);
        if store.state().playing {
            self.arm();
        } else {
            self.cancel();
        }
    }

    /// Pointer moved over the player.
    pub fn pointer_moved(&mut self, store: &mut Store) {
        self.show_and_rearm(store);
    }

    /// Pointer left the player area: hide at once unless pinned.
    pub fn pointer_left(&mut self, store: &mut Store) {
        let state = store.state();
        if state.settings_open || !state.playing {
            return;
        }
        self.cancel();
        store.update(|s| s.controls_visible = false);
    }

    /// Opens or closes the settings menu.
    pub fn toggle_settings(&mut self, store: &mut Store) {
        store.update(|s| s.settings_open = !s.settings_open);
        self.sync(store);
    }

    /// Reacts to `playing` / `settings_open` transitions made elsewhere.
    ///
    /// Any transition shows the controls. Pausing pins them visible;
    /// resuming, or closing the menu while playing, restarts the window.
    pub fn sync(&mut self, store: &mut Store) {
        let state = store.state();
        let current = (state.playing, state.settings_open);
        if self.observed == Some(current) {
            return;
        }
        self.observed = Some(current);
        self.show_and_rearm(store);
    }

    /// A timer armed by this controller expired.
    pub fn on_timer_elapsed(&mut self, generation: u64, store: &mut Store) {
        if self.pending_generation() != Some(generation) {
            tracing::trace!(generation, "ignoring stale auto-hide timer");
            return;
        }
        self.pending = None;

        let state = store.state();
        if !state.playing {
            return;
        }
        if state.settings_open {
            tracing::debug!("settings menu open, deferring auto-hide");
            self.arm();
            return;
        }
        store.update(|s| s.controls_visible = false);
    }

    /// Completes when the pending timer expires, yielding its generation.
    ///
    /// Never completes while no timer is armed. Cancel-safe: dropping the
    /// future leaves the timer in place.
    pub async fn expired(&mut self) -> u64 {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.sleep.as_mut().await;
                pending.generation
            }
            None => std::future::pending().await,
        }
    }
}
