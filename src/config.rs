//! Configuration management for the toolbox
//!
//! Settings are loaded from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `TOOLBOX_DATA_DIR`: Directory holding the stored collection - default: platform data dir + "ppx-toolbox"
//! - `TOOLBOX_STORAGE_KEY`: Key (file stem) of the stored collection - default: "ppx_toolbox_data_v2"
//! - `TOOLBOX_EXPORT_DIR`: Directory for backup files - default: current directory
//! - `TOOLBOX_OPEN_COMMAND`: Program used to open URLs - default: the platform URL handler
//! - `TOOLBOX_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use ppx_toolbox::ToolboxConfig;
//!
//! let config = ToolboxConfig::default();
//! config.validate().expect("Invalid configuration");
//! let store = config.create_store();
//! ```

use crate::interact::{CommandOpener, SystemOpener, UrlOpener};
use crate::store::FileStore;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Default values for configuration
pub const DEFAULT_STORAGE_KEY: &str = "ppx_toolbox_data_v2";
const DEFAULT_DATA_DIR_NAME: &str = "ppx-toolbox";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Storage key cannot be used as a file name
    #[error("Invalid storage key '{0}': must be non-empty and contain only letters, digits, '-', '_' or '.'")]
    InvalidStorageKey(String),
}

/// Main configuration structure for the toolbox
#[derive(Debug, Clone)]
pub struct ToolboxConfig {
    /// Directory holding the stored collection
    pub data_dir: PathBuf,

    /// Key under which the collection snapshot is stored
    pub storage_key: String,

    /// Directory that exports are written to
    pub export_dir: PathBuf,

    /// Program used to open tool URLs, platform default when `None`
    pub open_command: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join(DEFAULT_DATA_DIR_NAME)
}

impl Default for ToolboxConfig {
    /// Creates a new configuration by loading from environment variables with defaults
    fn default() -> Self {
        let data_dir = env::var("TOOLBOX_DATA_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let storage_key =
            env::var("TOOLBOX_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        let export_dir = env::var("TOOLBOX_EXPORT_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let open_command = env::var("TOOLBOX_OPEN_COMMAND")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let log_level = env::var("TOOLBOX_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            data_dir,
            storage_key,
            export_dir,
            open_command,
            log_level,
        }
    }
}

impl ToolboxConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the storage key is unusable or the log level is unknown
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key_ok = !self.storage_key.is_empty()
            && self
                .storage_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !self.storage_key.starts_with('.');
        if !key_ok {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Creates the file store rooted at the data directory
    pub fn create_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    /// Creates the URL opener selected by `open_command`
    pub fn create_opener(&self) -> Box<dyn UrlOpener> {
        match &self.open_command {
            Some(program) => Box::new(CommandOpener::new(program.trim())),
            None => Box::new(SystemOpener),
        }
    }

    /// Path of the stored collection file
    pub fn snapshot_path(&self) -> PathBuf {
        self.create_store().path_for(&self.storage_key)
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("data_dir".to_string(), self.data_dir.display().to_string());
        map.insert("storage_key".to_string(), self.storage_key.clone());
        map.insert(
            "snapshot_path".to_string(),
            self.snapshot_path().display().to_string(),
        );
        map.insert(
            "export_dir".to_string(),
            self.export_dir.display().to_string(),
        );
        map.insert(
            "open_command".to_string(),
            self.open_command
                .clone()
                .unwrap_or_else(|| "(system default)".to_string()),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for ToolboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Toolbox Configuration:")?;
        writeln!(f, "  Data Dir: {}", self.data_dir.display())?;
        writeln!(f, "  Storage Key: {}", self.storage_key)?;
        writeln!(f, "  Export Dir: {}", self.export_dir.display())?;
        match &self.open_command {
            Some(cmd) => writeln!(f, "  Open Command: {}", cmd)?,
            None => writeln!(f, "  Open Command: (system default)")?,
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn sample() -> ToolboxConfig {
        ToolboxConfig {
            data_dir: PathBuf::from("/tmp/toolbox"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_dir: PathBuf::from("."),
            open_command: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("TOOLBOX_DATA_DIR"),
            EnvGuard::unset("TOOLBOX_STORAGE_KEY"),
            EnvGuard::unset("TOOLBOX_EXPORT_DIR"),
            EnvGuard::unset("TOOLBOX_OPEN_COMMAND"),
            EnvGuard::unset("TOOLBOX_LOG_LEVEL"),
        ];

        let config = ToolboxConfig::default();

        assert!(config.data_dir.ends_with(DEFAULT_DATA_DIR_NAME));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.open_command.is_none());
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("TOOLBOX_DATA_DIR", "/var/lib/toolbox"),
            EnvGuard::set("TOOLBOX_STORAGE_KEY", "work_links"),
            EnvGuard::set("TOOLBOX_EXPORT_DIR", "/tmp/backups"),
            EnvGuard::set("TOOLBOX_OPEN_COMMAND", "firefox"),
            EnvGuard::set("TOOLBOX_LOG_LEVEL", "DEBUG"),
        ];

        let config = ToolboxConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/toolbox"));
        assert_eq!(config.storage_key, "work_links");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/backups"));
        assert_eq!(config.open_command.as_deref(), Some("firefox"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_validation_rejects_bad_keys() {
        for key in ["", "a/b", "..", ".hidden", "key with space"] {
            let mut config = sample();
            config.storage_key = key.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidStorageKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = sample();
        config.log_level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_snapshot_path() {
        let config = sample();
        assert_eq!(
            config.snapshot_path(),
            PathBuf::from("/tmp/toolbox/ppx_toolbox_data_v2.json")
        );
    }

    #[test]
    fn test_config_display() {
        let display = format!("{}", sample());
        assert!(display.contains("Toolbox Configuration:"));
        assert!(display.contains("Storage Key: ppx_toolbox_data_v2"));
    }

    #[test]
    fn test_display_map_has_all_fields() {
        let map = sample().to_display_map();
        for key in ["data_dir", "storage_key", "snapshot_path", "export_dir", "open_command", "log_level"] {
            assert!(map.contains_key(key), "missing {}", key);
        }
    }
}
