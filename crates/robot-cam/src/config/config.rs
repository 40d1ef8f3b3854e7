//! Configuration management for robot-cam.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{CameraConfig, ControlConfig, HotkeyConfig, RecordingConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    str::FromStr,
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use global_hotkey::hotkey::HotKey;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// UDP control channel settings.
    #[serde(default)]
    pub control: ControlConfig,
    /// Camera encoder settings.
    #[serde(default)]
    pub camera: CameraConfig,
    /// Recording output settings.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Manual start/stop hotkeys.
    #[serde(default)]
    pub hotkeys: HotkeyConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            Self::create_default(&config_path)
        }
    }

    /// Load and validate configuration from an explicit path.
    #[track_caller]
    #[instrument]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config {:?}: {}", config_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Reject values the control loop cannot run with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        if self.control.poll_timeout_ms == 0 {
            return Err(invalid("control.poll_timeout_ms must be greater than 0"));
        }
        if self.camera.chunk_size == 0 {
            return Err(invalid("camera.chunk_size must be greater than 0"));
        }
        if self.camera.fps == 0 {
            return Err(invalid("camera.fps must be greater than 0"));
        }
        if self.camera.startup_timeout_ms == 0 {
            return Err(invalid("camera.startup_timeout_ms must be greater than 0"));
        }
        if self.camera.program.trim().is_empty() {
            return Err(invalid("camera.program must not be empty"));
        }

        for (name, value) in [
            ("hotkeys.start", &self.hotkeys.start),
            ("hotkeys.stop", &self.hotkeys.stop),
        ] {
            if let Err(e) = HotKey::from_str(value) {
                return Err(invalid(format!("Invalid {} {:?}: {}", name, value, e)));
            }
        }

        if self.hotkeys.start == self.hotkeys.stop {
            return Err(invalid("hotkeys.start and hotkeys.stop must differ"));
        }

        Ok(())
    }

    /// Save configuration to `config_path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "robot-cam", "Robot-Cam").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default(config_path: &Path) -> AppResult<Self> {
        let config = Config::default();

        config.save_to(config_path)?;

        info!(
            config_path = ?config_path,
            control = %config.control.socket_addr(),
            device = %config.camera.device,
            "Default config created"
        );

        Ok(config)
    }
}

#[track_caller]
fn invalid(reason: impl Into<String>) -> AppError {
    AppError::ConfigError {
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
