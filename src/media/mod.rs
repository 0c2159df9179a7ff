// SPDX-License-Identifier: MPL-2.0
//! Media handles for playback sessions.
//!
//! A [`MediaProvider`] turns a file selection into a [`MediaHandle`]: a
//! playable resource reference with a bounded lifetime. Sessions hold their
//! handle through a [`MediaLease`], which releases it exactly once on every
//! exit path, including an early drop.

use crate::error::{Result, SessionError};
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Supported file extensions.
pub mod extensions {
    /// Video container extensions. Sources with these can go picture-in-picture.
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "avi", "mov", "mkv", "webm"];
}

/// A playable resource reference owned by one playback session.
pub trait MediaHandle: fmt::Debug {
    /// Reference the media engine opens (e.g. an object URL).
    fn reference(&self) -> &str;

    /// Whether the source can be shown picture-in-picture.
    fn can_enable_pip(&self) -> bool;

    /// Frees the underlying resource. Called once, when the session ends.
    fn release(&mut self);
}

/// Resolves file selections into media handles.
pub trait MediaProvider {
    fn open(&self, path: &Path) -> Result<Box<dyn MediaHandle>>;
}

/// Provider for files on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMediaProvider;

/// Source of unique handle references within this process.
static NEXT_REFERENCE: AtomicU64 = AtomicU64::new(1);

impl MediaProvider for LocalMediaProvider {
    fn open(&self, path: &Path) -> Result<Box<dyn MediaHandle>> {
        let metadata = std::fs::metadata(path)
            .map_err(|_| SessionError::ResourceUnavailable(path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(SessionError::NotAFile(path.to_path_buf()).into());
        }
        Ok(Box::new(LocalMedia::new(path)))
    }
}

/// Handle to a local file.
#[derive(Debug)]
pub struct LocalMedia {
    reference: String,
    pip: bool,
    released: bool,
}

impl LocalMedia {
    fn new(path: &Path) -> Self {
        let id = NEXT_REFERENCE.fetch_add(1, Ordering::Relaxed);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            reference: format!("media://{id}/{file_name}"),
            pip: is_video_path(path),
            released: false,
        }
    }
}

impl MediaHandle for LocalMedia {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn can_enable_pip(&self) -> bool {
        self.pip
    }

    fn release(&mut self) {
        if !self.released {
            tracing::debug!(reference = %self.reference, "releasing media handle");
            self.released = true;
        }
    }
}

/// Returns true if the path carries a video container extension.
#[must_use]
pub fn is_video_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| extensions::VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// Scoped ownership of a media handle.
///
/// The handle is released by [`MediaLease::release`] or, failing that,
/// when the lease is dropped.
#[derive(Debug)]
pub struct MediaLease {
    handle: Option<Box<dyn MediaHandle>>,
}

impl MediaLease {
    pub fn new(handle: Box<dyn MediaHandle>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Releases the handle now. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.release();
        }
    }
}

impl Drop for MediaLease {
    fn drop(&mut self) {
        self.release();
    }
}
