// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

use crate::error::Result;
use crate::video_player::{EngineCommand, MediaEngine};
use std::cell::RefCell;
use std::rc::Rc;

/// Engine double that records every command it receives.
///
/// Clones share the same log, so a test can keep one clone while the
/// transport owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    commands: Rc<RefCell<Vec<EngineCommand>>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the recorded commands.
    pub fn take(&self) -> Vec<EngineCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    /// Returns the targets of recorded absolute seeks, oldest first.
    pub fn seek_targets(&self) -> Vec<f64> {
        self.commands
            .borrow()
            .iter()
            .filter_map(|cmd| match cmd {
                EngineCommand::SeekAbsolute(secs) => Some(*secs),
                _ => None,
            })
            .collect()
    }
}

impl MediaEngine for RecordingEngine {
    fn send(&mut self, command: EngineCommand) -> Result<()> {
        self.commands.borrow_mut().push(command);
        Ok(())
    }
}
