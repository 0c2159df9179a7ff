// SPDX-License-Identifier: MPL-2.0
//! Headless clock-driven media engine.
//!
//! Plays a media of known duration without decoding anything: position
//! advances with wall-clock time scaled by the playback rate, and progress is
//! reported on a fixed cadence like a real player's progress callback. The
//! platform side is simulated too: fullscreen and picture-in-picture requests
//! are confirmed, or refused when configured to.

use super::engine::{EngineCommand, EngineEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

/// Progress reporting cadence.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Simulated engine state.
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    duration: f64,
    position: f64,
    playing: bool,
    rate: f64,
    pip: bool,
    fullscreen: bool,
    refuse_fullscreen: bool,
}

impl SimulatedEngine {
    /// Creates an engine for a media of `duration_secs` seconds, paused at 0.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration: duration_secs.max(0.0),
            position: 0.0,
            playing: false,
            rate: 1.0,
            pip: false,
            fullscreen: false,
            refuse_fullscreen: false,
        }
    }

    /// Makes the simulated platform refuse fullscreen requests.
    #[must_use]
    pub fn refusing_fullscreen(mut self) -> Self {
        self.refuse_fullscreen = true;
        self
    }

    /// Current position in seconds.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn progress(&self) -> EngineEvent {
        let played = if self.duration > 0.0 {
            self.position / self.duration
        } else {
            0.0
        };
        EngineEvent::Progress {
            played,
            loaded: 1.0,
        }
    }

    /// Applies one command, returning the events it causes.
    pub fn apply(&mut self, command: EngineCommand) -> Vec<EngineEvent> {
        match command {
            EngineCommand::Play => {
                self.playing = true;
                Vec::new()
            }
            EngineCommand::Pause => {
                self.playing = false;
                Vec::new()
            }
            EngineCommand::SeekAbsolute(secs) => {
                self.position = secs.clamp(0.0, self.duration);
                vec![self.progress()]
            }
            EngineCommand::SetRate(rate) => {
                self.rate = rate;
                Vec::new()
            }
            EngineCommand::SetVolume(_) | EngineCommand::SetMuted(_) => Vec::new(),
            EngineCommand::RequestPip(enable) => {
                if self.pip == enable {
                    return Vec::new();
                }
                self.pip = enable;
                vec![EngineEvent::PipChanged(enable)]
            }
            EngineCommand::RequestFullscreen(enable) => {
                if self.refuse_fullscreen {
                    tracing::debug!(enable, "platform refused fullscreen request");
                    return Vec::new();
                }
                if self.fullscreen == enable {
                    return Vec::new();
                }
                self.fullscreen = enable;
                vec![EngineEvent::FullscreenChanged(enable)]
            }
        }
    }

    /// Advances the clock by `elapsed`, returning the events it causes.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<EngineEvent> {
        if !self.playing {
            return Vec::new();
        }
        self.position = (self.position + elapsed.as_secs_f64() * self.rate).min(self.duration);
        if self.position >= self.duration {
            self.playing = false;
            return vec![self.progress(), EngineEvent::Ended];
        }
        vec![self.progress()]
    }

    /// Drives the engine until the command channel closes or the event
    /// receiver goes away.
    ///
    /// Reports the duration first, then progress on every tick.
    pub async fn run<T>(
        mut self,
        mut commands: mpsc::UnboundedReceiver<EngineCommand>,
        events: mpsc::UnboundedSender<T>,
    ) where
        T: From<EngineEvent>,
    {
        if events.send(EngineEvent::Duration(self.duration).into()).is_err() {
            return;
        }

        let mut ticker = interval(PROGRESS_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            let produced = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                _ = ticker.tick() => self.advance(PROGRESS_INTERVAL),
            };
            for event in produced {
                if events.send(event.into()).is_err() {
                    return;
                }
            }
        }
        tracing::debug!("simulated engine stopped");
    }
}
