// SPDX-License-Identifier: MPL-2.0
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Session(SessionError),
}

/// Failures that prevent a playback session from existing at all.
///
/// Transport operations never produce these: unsupported or rejected
/// requests inside a live session are silent no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The selected file could not be resolved to a playable resource.
    ResourceUnavailable(PathBuf),

    /// The selection exists but is not a regular file.
    NotAFile(PathBuf),

    /// The media engine's command channel is closed.
    EngineGone,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ResourceUnavailable(path) => {
                write!(f, "Media unavailable: {}", path.display())
            }
            SessionError::NotAFile(path) => write!(f, "Not a file: {}", path.display()),
            SessionError::EngineGone => write!(f, "Media engine is not running"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Session(e) => write!(f, "Session Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Error::Session(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
