// SPDX-License-Identifier: MPL-2.0
//! `lens_player` is the playback control core of a local video player.
//!
//! It owns the observable playback state of a session, translates user
//! intent (clicks, scrubbing, keyboard shortcuts) into media engine commands,
//! folds engine reports back into the state, and auto-hides the control
//! overlay while media plays.

#![doc(html_root_url = "https://docs.rs/lens_player/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod media;
pub mod session;
pub mod ui;
pub mod video_player;

#[cfg(test)]
mod test_utils;
