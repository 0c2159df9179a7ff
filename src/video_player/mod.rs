// SPDX-License-Identifier: MPL-2.0
//! Playback control core.
//!
//! The [`Store`] holds the single [`PlaybackState`] of a session and notifies
//! observers on change. The [`Transport`] turns user intent into state
//! changes plus commands for the [`MediaEngine`], whose reports come back as
//! [`EngineEvent`]s and are folded into the store.

pub mod engine;
pub mod simulated;
mod state;
pub mod time_units;
mod transport;

pub use engine::{ChannelEngine, EngineCommand, EngineEvent, MediaEngine};
pub use simulated::SimulatedEngine;
pub use state::{PlaybackState, Store};
pub use transport::Transport;
