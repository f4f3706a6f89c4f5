//! Configuration loading traits and types.
//!
//! Provides a standardized way to load the TOML configuration of a
//! kinematics module.
//!
//! # Usage
//!
//! ```rust,no_run
//! use kins_common::config::{ConfigLoader, ConfigError, KinsConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = KinsConfig::load(Path::new("trivkins.toml"))?;
//!     config.validate()?;
//!     println!("Coordinates: {}", config.kinematics.coordinates);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::{CYCLE_TIME_US, DEFAULT_MODULE_NAME, MAX_JOINTS};

/// Configuration loading error.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Configuration file not found")]
    FileNotFound,

    /// Unreadable file or invalid TOML; carries the path and cause.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Logging verbosity, lowercase in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// `[shared]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Module name; prefix of every pin and exported function.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: default_service_name(),
        }
    }
}

fn default_service_name() -> String {
    DEFAULT_MODULE_NAME.to_string()
}

fn default_max_joints() -> usize {
    MAX_JOINTS
}

fn default_cycle_time_us() -> u64 {
    CYCLE_TIME_US
}

/// Kinematics module parameters.
///
/// `coordinates` lists the axis letters in joint order; `extrajoints` is
/// the number of non-kinematic joints appended after them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsSection {
    /// Axis letters ordered for joint creation (e.g. `"XYZAB"`).
    #[serde(default)]
    pub coordinates: String,

    /// Number of extra joints (not used for kinematics).
    #[serde(default)]
    pub extrajoints: i32,

    /// Maximum total joint count of the motion core.
    #[serde(default = "default_max_joints")]
    pub max_joints: usize,

    /// Control cycle period [µs].
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u64,
}

impl Default for KinematicsSection {
    fn default() -> Self {
        Self {
            coordinates: String::new(),
            extrajoints: 0,
            max_joints: default_max_joints(),
            cycle_time_us: default_cycle_time_us(),
        }
    }
}

/// Complete module configuration file.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// service_name = "trivkinsplus"
///
/// [kinematics]
/// coordinates = "XYZAB"
/// extrajoints = 1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KinsConfig {
    /// Common fields.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Kinematics parameters.
    #[serde(default)]
    pub kinematics: KinematicsSection,
}

impl KinsConfig {
    /// Validate the configuration.
    ///
    /// Axis letters are checked later by the joint map parser, which
    /// reports the offending character.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    /// - `cycle_time_us` is zero
    /// - `max_joints` is outside `1..=MAX_JOINTS`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shared.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }

        if self.kinematics.cycle_time_us == 0 {
            return Err(ConfigError::ValidationError(
                "cycle_time_us must be > 0".to_string(),
            ));
        }

        if !(1..=MAX_JOINTS).contains(&self.kinematics.max_joints) {
            return Err(ConfigError::ValidationError(format!(
                "max_joints must be in 1..={MAX_JOINTS}, got {}",
                self.kinematics.max_joints
            )));
        }
        Ok(())
    }
}

/// Load any deserializable configuration from a TOML file.
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound,
            _ => ConfigError::ParseError(format!("{}: {e}", path.display())),
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize)]
        struct TestWrapper {
            level: LogLevel,
        }

        let parsed = |s: &str| toml::from_str::<TestWrapper>(s).unwrap().level;
        assert_eq!(parsed("level = \"trace\""), LogLevel::Trace);
        assert_eq!(parsed("level = \"warn\""), LogLevel::Warn);
        assert_eq!(parsed("level = \"error\""), LogLevel::Error);
    }

    #[test]
    fn test_log_level_to_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Info), tracing::Level::INFO);
    }

    #[test]
    fn test_defaults() {
        let config = KinsConfig::default();
        assert_eq!(config.shared.service_name, DEFAULT_MODULE_NAME);
        assert_eq!(config.kinematics.extrajoints, 0);
        assert_eq!(config.kinematics.max_joints, MAX_JOINTS);
        assert_eq!(config.kinematics.cycle_time_us, CYCLE_TIME_US);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_service_name_rejected() {
        let mut config = KinsConfig::default();
        config.shared.service_name.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_cycle_time_rejected() {
        let mut config = KinsConfig::default();
        config.kinematics.cycle_time_us = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_joints_bounds() {
        let mut config = KinsConfig::default();
        config.kinematics.max_joints = 0;
        assert!(config.validate().is_err());
        config.kinematics.max_joints = MAX_JOINTS + 1;
        assert!(config.validate().is_err());
        config.kinematics.max_joints = 9;
        assert!(config.validate().is_ok());
    }
}
