// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core playback value objects with ZERO external dependencies.
//!
//! This module contains pure domain types and the rules that keep them valid.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability.
//!
//! # Modules
//!
//! - [`ui`]: UI value objects ([`OverlayTimeout`](ui::OverlayTimeout))
//! - [`video`]: Video playback types ([`Volume`](video::Volume),
//!   [`PlaybackRate`](video::PlaybackRate), [`PlayedFraction`](video::PlayedFraction))

pub mod ui;
pub mod video;
