// SPDX-License-Identifier: MPL-2.0
//! Interaction policies for the player chrome.
//!
//! - [`auto_hide`] - showing and hiding the control overlay
//! - [`keyboard`] - keyboard shortcuts

pub mod auto_hide;
pub mod keyboard;

pub use auto_hide::AutoHide;
pub use keyboard::{map_key, FocusTarget, KeyBinding, KeyCommand};
