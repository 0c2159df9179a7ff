// SPDX-License-Identifier: MPL-2.0
//! Playback session.
//!
//! A session exists from the moment a media handle becomes available until
//! the user leaves the player. It owns the state store, the transport, the
//! auto-hide controller and the media lease. All input (engine events,
//! pointer and keyboard events, control clicks) arrives as [`Message`]s and
//! is processed one at a time on a single task.
//!
//! Closing the session consumes it, so keyboard handling and engine events
//! cannot reach a disposed store, and the media handle is released on every
//! exit path.

use crate::config::Config;
use crate::domain::ui::OverlayTimeout;
use crate::domain::video::{KeyboardSeekStep, Volume};
use crate::error::Result;
use crate::media::{MediaHandle, MediaLease, MediaProvider};
use crate::ui::auto_hide::AutoHide;
use crate::ui::keyboard::{map_key, FocusTarget, KeyCommand};
use crate::video_player::{
    EngineEvent, MediaEngine, PlaybackState, Store, Transport,
};
use iced_core::keyboard::Key;
use std::path::Path;
use tokio::sync::{mpsc, watch};

/// Per-session settings, usually taken from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub volume: Volume,
    pub autoplay: bool,
    pub seek_step: KeyboardSeekStep,
    pub volume_step: f32,
    pub overlay_timeout: OverlayTimeout,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            volume: config.volume(),
            autoplay: config.autoplay(),
            seek_step: config.keyboard_seek_step(),
            volume_step: config.volume_step(),
            overlay_timeout: config.overlay_timeout(),
        }
    }
}

/// Input to a playback session.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Report from the media engine or the platform.
    Engine(EngineEvent),

    /// Play/pause button or click on the video.
    TogglePlayPause,
    /// Volume slider moved (0.0 to 1.0).
    SetVolume(f32),
    ToggleMute,
    /// Relative seek in seconds (can be negative).
    SeekBy(f64),
    /// Pointer went down on the scrubber.
    BeginScrub,
    /// Scrubber dragged to a fraction of the duration.
    ScrubPreview(f64),
    /// Scrubber released at a fraction of the duration.
    CommitScrub(f64),
    /// Playback rate picked in the settings menu.
    SetPlaybackRate(f64),
    ToggleSettings,
    TogglePip,
    ToggleFullscreen,

    /// Pointer moved over the player.
    PointerMoved,
    /// Pointer left the player area.
    PointerLeft,
    /// Key pressed, with what had focus at the time.
    KeyPressed { key: Key, focus: FocusTarget },

    /// User navigated away from the player.
    Close,
}

impl From<EngineEvent> for Message {
    fn from(event: EngineEvent) -> Self {
        Message::Engine(event)
    }
}

/// Outcome of handling a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing observable happened.
    None,
    /// The playback state changed; views should re-render.
    StateChanged,
    /// A shortcut ran and the host must cancel the key's default action.
    /// `state_changed` tells whether the shortcut also altered the state.
    SuppressDefault { state_changed: bool },
    /// The session wants to end; call [`PlaybackSession::close`].
    CloseRequested,
}

/// Handle for posting messages to a running session.
pub type SessionSender = mpsc::UnboundedSender<Message>;

/// One playback session.
pub struct PlaybackSession<E = Box<dyn MediaEngine>> {
    store: Store,
    transport: Transport<E>,
    auto_hide: AutoHide,
    options: SessionOptions,
    lease: MediaLease,
    inbox: mpsc::UnboundedReceiver<Message>,
    sender: SessionSender,
}

impl<E> std::fmt::Debug for PlaybackSession<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("state", &self.store.state())
            .field("options", &self.options)
            .field("lease", &self.lease)
            .finish_non_exhaustive()
    }
}

impl<E: MediaEngine> PlaybackSession<E> {
    /// Starts a session for an already resolved media handle.
    ///
    /// Pushes the initial state to the engine and starts the auto-hide
    /// policy. Must be called from within a Tokio runtime.
    pub fn open(handle: Box<dyn MediaHandle>, engine: E, options: SessionOptions) -> Self {
        tracing::info!(reference = handle.reference(), "opening playback session");

        let mut store = Store::new(PlaybackState::initial(options.volume, options.autoplay));
        let mut transport = Transport::new(engine, handle.can_enable_pip());
        transport.prime(&store);

        let mut auto_hide = AutoHide::new(options.overlay_timeout);
        auto_hide.sync(&mut store);

        let (sender, inbox) = mpsc::unbounded_channel();
        Self {
            store,
            transport,
            auto_hide,
            options,
            lease: MediaLease::new(handle),
            inbox,
            sender,
        }
    }

    /// Resolves `path` through `provider` and starts a session for it.
    ///
    /// Fails with a session error if the media cannot be resolved; no
    /// session state is created in that case.
    pub fn open_path(
        provider: &dyn MediaProvider,
        path: &Path,
        engine: E,
        options: SessionOptions,
    ) -> Result<Self> {
        let handle = provider.open(path)?;
        Ok(Self::open(handle, engine, options))
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.store.state()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.store.subscribe()
    }

    /// Returns a sender for posting messages to [`PlaybackSession::run`].
    pub fn sender(&self) -> SessionSender {
        self.sender.clone()
    }

    /// Returns true if the media source supports picture-in-picture.
    #[must_use]
    pub fn pip_supported(&self) -> bool {
        self.transport.pip_supported()
    }

    /// Handles one message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        let before = self.store.state();
        let mut suppress_default = false;

        match msg {
            Message::Engine(event) => self.apply_engine_event(event),
            Message::TogglePlayPause => self.transport.toggle_play_pause(&mut self.store),
            Message::SetVolume(level) => self.transport.set_volume(&mut self.store, level),
            Message::ToggleMute => self.transport.toggle_mute(&mut self.store),
            Message::SeekBy(delta) => self.transport.seek_by(&mut self.store, delta),
            Message::BeginScrub => self.transport.begin_scrub(&mut self.store),
            Message::ScrubPreview(fraction) => {
                self.transport.update_scrub_preview(&mut self.store, fraction);
            }
            Message::CommitScrub(fraction) => {
                self.transport.commit_scrub(&mut self.store, fraction);
            }
            Message::SetPlaybackRate(rate) => {
                self.transport.set_playback_rate(&mut self.store, rate);
            }
            Message::ToggleSettings => self.auto_hide.toggle_settings(&mut self.store),
            Message::TogglePip => self.transport.toggle_pip(&self.store),
            Message::ToggleFullscreen => self.transport.toggle_fullscreen(&self.store),
            Message::PointerMoved => self.auto_hide.pointer_moved(&mut self.store),
            Message::PointerLeft => self.auto_hide.pointer_left(&mut self.store),
            Message::KeyPressed { key, focus } => {
                if let Some(binding) = map_key(&key, focus) {
                    self.run_key_command(binding.command);
                    suppress_default = binding.prevent_default;
                }
            }
            Message::Close => return Effect::CloseRequested,
        }

        self.auto_hide.sync(&mut self.store);

        let state_changed = self.store.state() != before;
        match (suppress_default, state_changed) {
            (true, state_changed) => Effect::SuppressDefault { state_changed },
            (false, true) => Effect::StateChanged,
            (false, false) => Effect::None,
        }
    }

    fn apply_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Progress { played, loaded } => {
                self.store.apply_engine_progress(played, loaded);
            }
            EngineEvent::Duration(seconds) => {
                self.store.apply_engine_duration(seconds);
            }
            EngineEvent::Ended => {
                tracing::debug!("playback ended");
                self.store.apply_engine_ended();
            }
            EngineEvent::PipChanged(active) => {
                self.store.apply_engine_pip_changed(active);
            }
            EngineEvent::FullscreenChanged(active) => {
                self.store.apply_engine_fullscreen_changed(active);
            }
        }
    }

    fn run_key_command(&mut self, command: KeyCommand) {
        let step = self.options.seek_step.value();
        let volume_step = self.options.volume_step;
        match command {
            KeyCommand::TogglePlayPause => self.transport.toggle_play_pause(&mut self.store),
            KeyCommand::SeekForward => self.transport.seek_by(&mut self.store, step),
            KeyCommand::SeekBackward => self.transport.seek_by(&mut self.store, -step),
            KeyCommand::VolumeUp => {
                let level = self.store.state().volume.raised_by(volume_step);
                self.transport.set_volume(&mut self.store, level.value());
            }
            KeyCommand::VolumeDown => {
                let level = self.store.state().volume.lowered_by(volume_step);
                self.transport.set_volume(&mut self.store, level.value());
            }
            KeyCommand::ToggleFullscreen => self.transport.toggle_fullscreen(&self.store),
            KeyCommand::ToggleMute => self.transport.toggle_mute(&mut self.store),
            KeyCommand::TogglePip => self.transport.toggle_pip(&self.store),
        }
    }

    /// Processes messages and auto-hide timers until [`Message::Close`]
    /// arrives, then closes the session.
    ///
    /// The session keeps a sender of its own, so dropping every handle
    /// returned by [`PlaybackSession::sender`] does not end the loop.
    pub async fn run(mut self) {
        enum Next {
            Message(Option<Message>),
            HideTimer(u64),
        }

        loop {
            let next = tokio::select! {
                msg = self.inbox.recv() => Next::Message(msg),
                generation = self.auto_hide.expired() => Next::HideTimer(generation),
            };
            match next {
                Next::HideTimer(generation) => {
                    self.auto_hide.on_timer_elapsed(generation, &mut self.store);
                }
                Next::Message(Some(msg)) => {
                    if self.handle(msg) == Effect::CloseRequested {
                        break;
                    }
                }
                Next::Message(None) => break,
            }
        }
        self.close();
    }

    /// Ends the session and releases the media handle.
    pub fn close(mut self) {
        self.lease.release();
        tracing::info!("playback session closed");
    }
}
