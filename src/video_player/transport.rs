// SPDX-License-Identifier: MPL-2.0
//! Transport controls.
//!
//! Every user-invocable playback operation lives here. Each one mutates the
//! [`Store`] and, where the engine has to act, issues an [`EngineCommand`].
//!
//! Fullscreen and picture-in-picture are requests only: the store flags move
//! when the platform confirms, never before, because the platform may refuse.

use super::engine::{EngineCommand, MediaEngine};
use super::state::Store;
use super::time_units::relative_seek_target;
use crate::domain::video::{PlaybackRate, PlayedFraction, Volume};

/// Distance from the end (seconds) at which play restarts from the beginning.
const END_TOLERANCE_SECS: f64 = 0.1;

/// Transport control surface bound to one media engine.
pub struct Transport<E = Box<dyn MediaEngine>> {
    engine: E,
    /// Whether the media source supports picture-in-picture.
    pip_supported: bool,
}

impl<E> std::fmt::Debug for Transport<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("pip_supported", &self.pip_supported)
            .finish_non_exhaustive()
    }
}

impl<E: MediaEngine> Transport<E> {
    pub fn new(engine: E, pip_supported: bool) -> Self {
        Self {
            engine,
            pip_supported,
        }
    }

    /// Returns true if the media source supports picture-in-picture.
    #[must_use]
    pub fn pip_supported(&self) -> bool {
        self.pip_supported
    }

    /// Pushes the full initial state to the engine.
    ///
    /// Called once when the session opens so the engine starts in sync.
    pub fn prime(&mut self, store: &Store) {
        let state = store.state();
        self.send(EngineCommand::SetVolume(state.volume.value()));
        self.send(EngineCommand::SetMuted(state.muted));
        self.send(EngineCommand::SetRate(state.rate.value()));
        if state.playing {
            self.send(EngineCommand::Play);
        }
    }

    fn send(&mut self, command: EngineCommand) {
        if let Err(err) = self.engine.send(command.clone()) {
            tracing::warn!(?command, %err, "engine rejected command");
        }
    }

    // ------------------------------------------------------------------
    // Play / pause
    // ------------------------------------------------------------------

    /// Starts playback. No-op if already playing.
    ///
    /// When stopped at the end of the media, playback restarts from the
    /// beginning.
    pub fn play(&mut self, store: &mut Store) {
        let state = store.state();
        if state.playing {
            return;
        }
        let at_end = state.has_duration()
            && (state.played.is_at_end()
                || state.duration - state.position_secs() < END_TOLERANCE_SECS);
        if at_end {
            self.send(EngineCommand::SeekAbsolute(0.0));
            store.update(|s| s.played = PlayedFraction::START);
        }
        store.update(|s| s.playing = true);
        self.send(EngineCommand::Play);
    }

    /// Pauses playback. No-op if already paused.
    pub fn pause(&mut self, store: &mut Store) {
        if !store.state().playing {
            return;
        }
        store.update(|s| s.playing = false);
        self.send(EngineCommand::Pause);
    }

    /// Flips between playing and paused.
    pub fn toggle_play_pause(&mut self, store: &mut Store) {
        if store.state().playing {
            self.pause(store);
        } else {
            self.play(store);
        }
    }

    // ------------------------------------------------------------------
    // Volume
    // ------------------------------------------------------------------

    /// Sets the output level. A level of zero counts as muting.
    pub fn set_volume(&mut self, store: &mut Store, level: f32) {
        let volume = Volume::new(level);
        let changed = store.update(|s| {
            s.volume = volume;
            s.muted = volume.is_zero();
        });
        if changed {
            let muted = store.state().muted;
            self.send(EngineCommand::SetVolume(volume.value()));
            self.send(EngineCommand::SetMuted(muted));
        }
    }

    /// Flips the mute flag, keeping the stored level.
    pub fn toggle_mute(&mut self, store: &mut Store) {
        let muted = !store.state().muted;
        store.update(|s| s.muted = muted);
        self.send(EngineCommand::SetMuted(muted));
    }

    // ------------------------------------------------------------------
    // Seeking
    // ------------------------------------------------------------------

    /// Seeks `delta_secs` away from the current position, clamped to the media.
    ///
    /// Does nothing until the engine has reported a duration, or when the
    /// delta is not finite.
    pub fn seek_by(&mut self, store: &mut Store, delta_secs: f64) {
        if !delta_secs.is_finite() {
            tracing::debug!(delta_secs, "ignoring non-finite relative seek");
            return;
        }
        let state = store.state();
        if !state.has_duration() {
            tracing::debug!(delta_secs, "relative seek before duration is known");
            return;
        }
        let target = relative_seek_target(state.position_secs(), delta_secs, state.duration);
        self.send(EngineCommand::SeekAbsolute(target));
        store.update(|s| {
            if !s.seeking {
                s.played = PlayedFraction::from_seconds(target, s.duration);
            }
        });
    }

    /// Pointer went down on the scrubber.
    pub fn begin_scrub(&mut self, store: &mut Store) {
        store.update(|s| s.seeking = true);
    }

    /// Scrubber moved: show the new position without asking the engine.
    pub fn update_scrub_preview(&mut self, store: &mut Store, fraction: f64) {
        store.update(|s| s.played = PlayedFraction::new(fraction));
    }

    /// Scrubber released: seek the engine, then hand the position back to it.
    ///
    /// `seeking` is cleared in the same call, after the seek is issued, so no
    /// progress report can land between the two.
    ///
    /// Before the engine has reported a duration there is nothing to seek
    /// into: the scrub ends and the scrubber returns to the start.
    pub fn commit_scrub(&mut self, store: &mut Store, fraction: f64) {
        if !store.state().has_duration() {
            tracing::debug!(fraction, "scrub committed before duration is known");
            store.update(|s| {
                s.played = PlayedFraction::START;
                s.seeking = false;
            });
            return;
        }
        let played = PlayedFraction::new(fraction);
        let target = played.seconds(store.state().duration);
        self.send(EngineCommand::SeekAbsolute(target));
        store.update(|s| {
            s.played = played;
            s.seeking = false;
        });
    }

    // ------------------------------------------------------------------
    // Rate
    // ------------------------------------------------------------------

    /// Selects a playback rate and closes the settings menu.
    ///
    /// Rates outside the preset list snap to the nearest preset.
    /// Non-finite rates leave the current rate untouched.
    pub fn set_playback_rate(&mut self, store: &mut Store, rate: f64) {
        let selected = match PlaybackRate::exact(rate) {
            Some(exact) => Some(exact),
            None => {
                let nearest = PlaybackRate::nearest(rate);
                match nearest {
                    Some(snapped) => tracing::warn!(rate, %snapped, "rate not offered, snapping"),
                    None => tracing::warn!(rate, "ignoring non-finite rate"),
                }
                nearest
            }
        };

        let previous = store.state().rate;
        store.update(|s| {
            if let Some(rate) = selected {
                s.rate = rate;
            }
            s.settings_open = false;
        });
        if let Some(rate) = selected.filter(|&r| r != previous) {
            self.send(EngineCommand::SetRate(rate.value()));
        }
    }

    // ------------------------------------------------------------------
    // Platform modes
    // ------------------------------------------------------------------

    /// Requests entering or leaving picture-in-picture.
    ///
    /// Silently ignored when the source cannot do picture-in-picture.
    pub fn toggle_pip(&mut self, store: &Store) {
        if !self.pip_supported {
            tracing::debug!("picture-in-picture not supported by this source");
            return;
        }
        self.send(EngineCommand::RequestPip(!store.state().pip));
    }

    /// Requests entering or leaving fullscreen on the player container.
    pub fn toggle_fullscreen(&mut self, store: &Store) {
        self.send(EngineCommand::RequestFullscreen(!store.state().fullscreen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, RecordingEngine};
    use crate::video_player::state::PlaybackState;

    fn setup(duration: f64) -> (Transport<RecordingEngine>, Store, RecordingEngine) {
        let engine = RecordingEngine::new();
        let transport = Transport::new(engine.clone(), true);
        let mut store = Store::new(PlaybackState::initial(Volume::default(), true));
        store.apply_engine_duration(duration);
        (transport, store, engine)
    }

    #[test]
    fn prime_sends_initial_state() {
        let (mut transport, store, engine) = setup(120.0);
        transport.prime(&store);
        assert_eq!(
            engine.take(),
            vec![
                EngineCommand::SetVolume(0.8),
                EngineCommand::SetMuted(false),
                EngineCommand::SetRate(1.0),
                EngineCommand::Play,
            ]
        );
    }

    #[test]
    fn toggle_play_pause_flips_and_commands_engine() {
        let (mut transport, mut store, engine) = setup(120.0);

        transport.toggle_play_pause(&mut store);
        assert!(!store.state().playing);
        transport.toggle_play_pause(&mut store);
        assert!(store.state().playing);

        assert_eq!(engine.take(), vec![EngineCommand::Pause, EngineCommand::Play]);
    }

    #[test]
    fn play_and_pause_are_idempotent() {
        let (mut transport, mut store, engine) = setup(120.0);
        transport.play(&mut store);
        assert!(engine.take().is_empty());

        transport.pause(&mut store);
        transport.pause(&mut store);
        assert_eq!(engine.take(), vec![EngineCommand::Pause]);
    }

    #[test]
    fn play_after_end_restarts_from_beginning() {
        let (mut transport, mut store, engine) = setup(120.0);
        store.apply_engine_progress(1.0, 1.0);
        store.apply_engine_ended();

        transport.toggle_play_pause(&mut store);

        assert!(store.state().playing);
        assert_eq!(store.state().played, PlayedFraction::START);
        assert_eq!(
            engine.take(),
            vec![EngineCommand::SeekAbsolute(0.0), EngineCommand::Play]
        );
    }

    #[test]
    fn play_mid_media_resumes_in_place() {
        let (mut transport, mut store, engine) = setup(120.0);
        store.apply_engine_progress(0.5, 1.0);
        transport.pause(&mut store);
        engine.take();

        transport.play(&mut store);
        assert_abs_diff_eq!(store.state().played.value(), 0.5);
        assert_eq!(engine.take(), vec![EngineCommand::Play]);
    }

    #[test]
    fn set_volume_tracks_mute_for_every_level() {
        let (mut transport, mut store, _engine) = setup(120.0);
        for step in 0..=10 {
            let level = step as f32 / 10.0;
            transport.set_volume(&mut store, level);
            let state = store.state();
            assert_abs_diff_eq!(state.volume.value(), level);
            assert_eq!(state.muted, level == 0.0);
        }
    }

    #[test]
    fn set_volume_commands_engine_once_per_change() {
        let (mut transport, mut store, engine) = setup(120.0);
        transport.set_volume(&mut store, 0.3);
        transport.set_volume(&mut store, 0.3);
        assert_eq!(
            engine.take(),
            vec![EngineCommand::SetVolume(0.3), EngineCommand::SetMuted(false)]
        );
    }

    #[test]
    fn toggle_mute_twice_restores_flag_and_keeps_volume() {
        let (mut transport, mut store, _engine) = setup(120.0);
        transport.set_volume(&mut store, 0.6);
        let before = store.state();

        transport.toggle_mute(&mut store);
        assert!(store.state().muted);
        transport.toggle_mute(&mut store);

        let after = store.state();
        assert_eq!(after.muted, before.muted);
        assert_abs_diff_eq!(after.volume.value(), before.volume.value());
    }

    #[test]
    fn seek_by_clamps_at_start() {
        let (mut transport, mut store, engine) = setup(120.0);
        transport.seek_by(&mut store, -5.0);
        assert_eq!(engine.seek_targets(), vec![0.0]);
        assert_eq!(store.state().played, PlayedFraction::START);
    }

    #[test]
    fn seek_by_clamps_at_end() {
        let (mut transport, mut store, engine) = setup(120.0);
        store.apply_engine_progress(118.0 / 120.0, 1.0);
        transport.seek_by(&mut store, 5.0);
        assert_eq!(engine.seek_targets(), vec![120.0]);
    }

    #[test]
    fn repeated_seeks_accumulate_before_engine_confirms() {
        let (mut transport, mut store, engine) = setup(120.0);
        store.apply_engine_progress(0.5, 1.0);
        transport.seek_by(&mut store, 5.0);
        transport.seek_by(&mut store, 5.0);

        let targets = engine.seek_targets();
        assert_eq!(targets.len(), 2);
        assert_abs_diff_eq!(targets[0], 65.0, epsilon = 1e-9);
        assert_abs_diff_eq!(targets[1], 70.0, epsilon = 1e-9);
    }

    #[test]
    fn seek_by_without_duration_is_ignored() {
        let (mut transport, _store, engine) = setup(120.0);
        let mut fresh = Store::default();
        transport.seek_by(&mut fresh, 5.0);
        assert!(engine.take().is_empty());
    }

    #[test]
    fn seek_by_non_finite_delta_is_ignored() {
        let (mut transport, mut store, engine) = setup(120.0);
        store.apply_engine_progress(0.5, 1.0);

        transport.seek_by(&mut store, f64::NAN);
        transport.seek_by(&mut store, f64::INFINITY);

        assert!(engine.take().is_empty());
        assert_abs_diff_eq!(store.state().played.value(), 0.5);
    }

    #[test]
    fn scrub_preview_survives_engine_progress() {
        let (mut transport, mut store, engine) = setup(120.0);
        transport.begin_scrub(&mut store);
        transport.update_scrub_preview(&mut store, 0.5);
        store.apply_engine_progress(0.1, 0.2);

        assert_abs_diff_eq!(store.state().played.value(), 0.5);
        assert!(engine.take().is_empty());
    }

    #[test]
    fn commit_scrub_seeks_once_and_clears_seeking() {
        let (mut transport, mut store, engine) = setup(120.0);
        transport.begin_scrub(&mut store);
        transport.commit_scrub(&mut store, 0.7);

        let state = store.state();
        assert!(!state.seeking);
        assert_abs_diff_eq!(state.played.value(), 0.7);

        let targets = engine.seek_targets();
        assert_eq!(targets.len(), 1);
        assert_abs_diff_eq!(targets[0], 84.0, epsilon = 1e-9);
    }

    #[test]
    fn commit_scrub_without_duration_does_not_seek() {
        let (mut transport, _store, engine) = setup(120.0);
        let mut fresh = Store::default();
        transport.begin_scrub(&mut fresh);
        transport.update_scrub_preview(&mut fresh, 0.7);
        transport.commit_scrub(&mut fresh, 0.7);

        let state = fresh.state();
        assert!(!state.seeking);
        assert_eq!(state.played, PlayedFraction::START);
        assert!(engine.take().is_empty());
    }

    #[test]
    fn progress_after_commit_is_accepted_again() {
        let (mut transport, mut store, _engine) = setup(120.0);
        transport.begin_scrub(&mut store);
        transport.commit_scrub(&mut store, 0.7);
        store.apply_engine_progress(0.71, 1.0);
        assert_abs_diff_eq!(store.state().played.value(), 0.71);
    }

    #[test]
    fn set_playback_rate_accepts_presets_and_closes_menu() {
        let (mut transport, mut store, engine) = setup(120.0);
        store.update(|s| s.settings_open = true);

        transport.set_playback_rate(&mut store, 1.5);

        let state = store.state();
        assert_abs_diff_eq!(state.rate.value(), 1.5);
        assert!(!state.settings_open);
        assert_eq!(engine.take(), vec![EngineCommand::SetRate(1.5)]);
    }

    #[test]
    fn set_playback_rate_never_stores_out_of_set_value() {
        let (mut transport, mut store, engine) = setup(120.0);
        transport.set_playback_rate(&mut store, 3.0);
        assert_abs_diff_eq!(store.state().rate.value(), 2.0);
        assert_eq!(engine.take(), vec![EngineCommand::SetRate(2.0)]);

        transport.set_playback_rate(&mut store, f64::NAN);
        assert_abs_diff_eq!(store.state().rate.value(), 2.0);
        assert!(engine.take().is_empty());
    }

    #[test]
    fn toggle_pip_requests_without_changing_state() {
        let (mut transport, store, engine) = setup(120.0);
        transport.toggle_pip(&store);
        assert!(!store.state().pip);
        assert_eq!(engine.take(), vec![EngineCommand::RequestPip(true)]);
    }

    #[test]
    fn toggle_pip_is_noop_when_unsupported() {
        let engine = RecordingEngine::new();
        let mut transport = Transport::new(engine.clone(), false);
        let store = Store::default();

        transport.toggle_pip(&store);
        assert!(engine.take().is_empty());
    }

    #[test]
    fn toggle_fullscreen_waits_for_platform_confirmation() {
        let (mut transport, mut store, engine) = setup(120.0);
        transport.toggle_fullscreen(&store);
        assert!(!store.state().fullscreen);
        assert_eq!(engine.take(), vec![EngineCommand::RequestFullscreen(true)]);

        store.apply_engine_fullscreen_changed(true);
        transport.toggle_fullscreen(&store);
        assert_eq!(engine.take(), vec![EngineCommand::RequestFullscreen(false)]);
    }
}
