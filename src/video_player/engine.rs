// SPDX-License-Identifier: MPL-2.0
//! Boundary between the playback core and the media engine.
//!
//! The engine is whatever actually decodes and renders the media. The core
//! talks to it through a command sink ([`MediaEngine`]) and hears back
//! through [`EngineEvent`]s delivered on the session's event queue.

use crate::error::{Result, SessionError};
use tokio::sync::mpsc;

/// Commands the core issues to the media engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Start or resume decoding.
    Play,
    /// Pause decoding at the current position.
    Pause,
    /// Jump to an absolute position in seconds.
    SeekAbsolute(f64),
    /// Set the output level (0.0 to 1.0).
    SetVolume(f32),
    /// Silence or restore audible output without touching the level.
    SetMuted(bool),
    /// Change the playback rate multiplier.
    SetRate(f64),
    /// Ask the platform to enter (`true`) or leave picture-in-picture.
    RequestPip(bool),
    /// Ask the platform to put the player container in or out of fullscreen.
    RequestFullscreen(bool),
}

/// Events the media engine and the platform report back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Periodic progress: played and buffered share of the media.
    Progress { played: f64, loaded: f64 },
    /// Media duration in seconds became known.
    Duration(f64),
    /// Playback reached the end of the media.
    Ended,
    /// The platform confirmed entering or leaving picture-in-picture.
    PipChanged(bool),
    /// The platform confirmed entering or leaving fullscreen.
    FullscreenChanged(bool),
}

/// Command sink of a media engine.
///
/// Requests are fire-and-forget: their outcome is only ever observed
/// through the engine's events.
pub trait MediaEngine {
    /// Delivers a command to the engine.
    fn send(&mut self, command: EngineCommand) -> Result<()>;
}

impl<E: MediaEngine + ?Sized> MediaEngine for Box<E> {
    fn send(&mut self, command: EngineCommand) -> Result<()> {
        (**self).send(command)
    }
}

/// Engine handle backed by an unbounded channel.
///
/// The receiving half belongs to whatever drives the real decoder.
#[derive(Debug, Clone)]
pub struct ChannelEngine {
    tx: mpsc::UnboundedSender<EngineCommand>,
}

impl ChannelEngine {
    /// Creates a connected engine handle and the receiver for its commands.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EngineCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns true if the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl MediaEngine for ChannelEngine {
    fn send(&mut self, command: EngineCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| SessionError::EngineGone.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn channel_engine_forwards_commands_in_order() {
        let (mut engine, mut rx) = ChannelEngine::new();
        engine.send(EngineCommand::Pause).unwrap();
        engine.send(EngineCommand::SeekAbsolute(12.5)).unwrap();

        assert_eq!(rx.try_recv().unwrap(), EngineCommand::Pause);
        assert_eq!(rx.try_recv().unwrap(), EngineCommand::SeekAbsolute(12.5));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_engine_reports_closed_receiver() {
        let (mut engine, rx) = ChannelEngine::new();
        drop(rx);

        assert!(engine.is_closed());
        let err = engine.send(EngineCommand::Play).unwrap_err();
        assert!(matches!(err, Error::Session(SessionError::EngineGone)));
    }

    #[test]
    fn boxed_engine_delegates() {
        let (engine, mut rx) = ChannelEngine::new();
        let mut boxed: Box<dyn MediaEngine> = Box::new(engine);
        boxed.send(EngineCommand::SetRate(1.5)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), EngineCommand::SetRate(1.5));
    }
}
