// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Only preferences live here. Playback state (position, pause, mute) is
//! never written to disk; every session starts from these defaults.
//!
//! # Examples
//!
//! ```no_run
//! use lens_player::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.autoplay = Some(false);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::ui::OverlayTimeout;
use crate::domain::video::{KeyboardSeekStep, Volume};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LensPlayer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub autoplay: Option<bool>,
    #[serde(default)]
    pub keyboard_seek_step_secs: Option<f64>,
    #[serde(default)]
    pub volume_step: Option<f32>,
    #[serde(default)]
    pub overlay_timeout_secs: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: Some(DEFAULT_VOLUME),
            autoplay: Some(DEFAULT_AUTOPLAY),
            keyboard_seek_step_secs: Some(DEFAULT_KEYBOARD_SEEK_STEP_SECS),
            volume_step: Some(DEFAULT_VOLUME_STEP),
            overlay_timeout_secs: Some(DEFAULT_OVERLAY_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Initial volume, clamped into range.
    #[must_use]
    pub fn volume(&self) -> Volume {
        Volume::new(
            self.volume
                .filter(|v| v.is_finite())
                .unwrap_or(DEFAULT_VOLUME),
        )
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(DEFAULT_AUTOPLAY)
    }

    #[must_use]
    pub fn keyboard_seek_step(&self) -> KeyboardSeekStep {
        KeyboardSeekStep::new(
            self.keyboard_seek_step_secs
                .filter(|secs| secs.is_finite())
                .unwrap_or(DEFAULT_KEYBOARD_SEEK_STEP_SECS),
        )
    }

    /// Volume change per arrow key press, clamped to a usable range.
    #[must_use]
    pub fn volume_step(&self) -> f32 {
        self.volume_step
            .filter(|step| step.is_finite())
            .unwrap_or(DEFAULT_VOLUME_STEP)
            .clamp(MIN_VOLUME_STEP, MAX_VOLUME_STEP)
    }

    #[must_use]
    pub fn overlay_timeout(&self) -> OverlayTimeout {
        OverlayTimeout::new(
            self.overlay_timeout_secs
                .unwrap_or(DEFAULT_OVERLAY_TIMEOUT_SECS),
        )
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_preferences() {
        let config = Config {
            volume: Some(0.4),
            autoplay: Some(false),
            keyboard_seek_step_secs: Some(10.0),
            volume_step: Some(0.05),
            overlay_timeout_secs: Some(6),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "autoplay = false\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(!loaded.autoplay());
        assert_abs_diff_eq!(loaded.volume().value(), DEFAULT_VOLUME);
        assert_eq!(loaded.overlay_timeout().value(), DEFAULT_OVERLAY_TIMEOUT_SECS);
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let config = Config {
            volume: Some(4.0),
            autoplay: None,
            keyboard_seek_step_secs: Some(0.0),
            volume_step: Some(2.0),
            overlay_timeout_secs: Some(0),
        };
        assert_abs_diff_eq!(config.volume().value(), 1.0);
        assert_abs_diff_eq!(config.keyboard_seek_step().value(), 0.5);
        assert_abs_diff_eq!(config.volume_step(), MAX_VOLUME_STEP);
        assert_eq!(config.overlay_timeout().value(), 1);
    }

    #[test]
    fn non_finite_values_fall_back_to_defaults() {
        let config: Config = toml::from_str(
            "volume = nan\nvolume_step = nan\nkeyboard_seek_step_secs = inf\n",
        )
        .expect("nan and inf are valid toml floats");

        assert_abs_diff_eq!(config.volume().value(), DEFAULT_VOLUME);
        assert_abs_diff_eq!(config.volume_step(), DEFAULT_VOLUME_STEP);
        assert_abs_diff_eq!(
            config.keyboard_seek_step().value(),
            DEFAULT_KEYBOARD_SEEK_STEP_SECS
        );
    }
}
