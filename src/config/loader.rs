//! Configuration loader
//!
//! Reads a TOML file; missing sections and fields fall back to the defaults.

use super::defaults::default_config;
use crate::core::types::Namespace;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,

    #[serde(default = "default_event")]
    pub event: EventConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

/// Event addressing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    /// Namespace used for `/n` when neither `/global` nor `/local` is given
    #[serde(default = "default_namespace")]
    pub default_namespace: Namespace,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Load and validate the file at `path`, or return defaults when `path` is `None`
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            let config = ConfigLoader::new(path).load()?;
            super::validate_config(&config)?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

// Default functions for serde
fn default_logging() -> LoggingConfig {
    let defaults = default_config();
    LoggingConfig {
        level: defaults.logging.level,
        ansi: defaults.logging.ansi,
    }
}

fn default_event() -> EventConfig {
    EventConfig {
        default_namespace: default_namespace(),
    }
}

fn default_log_level() -> String {
    default_config().logging.level
}

fn default_ansi() -> bool {
    default_config().logging.ansi
}

fn default_namespace() -> Namespace {
    default_config().event.default_namespace
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logging: default_logging(),
            event: default_event(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.event.default_namespace, Namespace::Default);
    }

    #[test]
    fn test_load_missing_file() {
        let loader = ConfigLoader::new("nonexistent.toml");
        let result = loader.load();
        assert!(matches!(result.unwrap_err(), ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        fs::write(
            &config_path,
            "[logging]\nlevel = \"debug\"\nansi = true\n\n[event]\ndefault_namespace = \"global\"\n",
        )
        .unwrap();

        let loaded = load_config(Some(&config_path)).unwrap();
        assert_eq!(loaded.event.default_namespace, Namespace::Global);
        assert_eq!(loaded.logging.level, "debug");
        assert!(loaded.logging.ansi);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
            [event]
            default_namespace = "local"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.event.default_namespace, Namespace::Local);
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.ansi);
    }

    #[test]
    fn test_unknown_namespace_rejected() {
        let toml_str = r#"
            [event]
            default_namespace = "session"
        "#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_config_validates() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[logging]\nlevel = \"loud\"\n").unwrap();

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[logging\n").unwrap();

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
