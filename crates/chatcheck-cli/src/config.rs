//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use chatcheck_validation::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-level configuration file, without extension
const CONFIG_FILE_STEM: &str = ".chatcheck";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validation defaults
    pub validation: ValidationConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// On-disk configuration formats, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "YAML, JSON or TOML".to_string(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let extensions = ["yaml", "yml", "json", "toml"];
        let mut paths = Vec::new();

        // Current directory
        for ext in extensions {
            paths.push(PathBuf::from(format!("{}.{}", CONFIG_FILE_STEM, ext)));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let chatcheck_dir = config_dir.join("chatcheck");
            for ext in extensions {
                paths.push(chatcheck_dir.join(format!("config.{}", ext)));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for ext in extensions {
                paths.push(home_dir.join(format!("{}.{}", CONFIG_FILE_STEM, ext)));
            }
        }

        paths
    }

    /// Path `config init` writes to when none is given
    pub fn default_init_path() -> PathBuf {
        PathBuf::from(format!("{}.yaml", CONFIG_FILE_STEM))
    }

    /// Serialize the configuration in the format matching `path`
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        let content = match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize configuration: {}", e)))?,
        };
        Ok(content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatcheck_core::ValidationMode;
    use chatcheck_validation::ValidatorProfile;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.validation.mode, ValidationMode::Test);
        assert_eq!(config.validation.profile, ValidatorProfile::Strict);
        assert_eq!(config.output.format, OutputFormat::Human);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_partial_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chatcheck.yaml");
        fs::write(
            &path,
            "validation:\n  mode: serving\n  profile: base\noutput:\n  format: json-pretty\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.validation.mode, ValidationMode::Serving);
        assert_eq!(config.validation.profile, ValidatorProfile::Base);
        assert_eq!(config.validation.max_errors, 0);
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(config.output.color);
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = TempDir::new().unwrap();

        let toml_path = dir.path().join("config.toml");
        fs::write(&toml_path, "[validation]\nfail_fast = true\nmax_errors = 3\n").unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert!(config.validation.fail_fast);
        assert_eq!(config.validation.max_errors, 3);

        let json_path = dir.path().join("config.json");
        fs::write(&json_path, r#"{"logging": {"level": "debug"}}"#).unwrap();
        let config = Config::from_file(&json_path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_missing_and_unknown_files() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("nope.yaml");
        assert!(matches!(Config::from_file(&missing), Err(Error::FileNotFound { .. })));

        let unknown = dir.path().join("config.ini");
        fs::write(&unknown, "mode=serving").unwrap();
        assert!(matches!(Config::from_file(&unknown), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.validation.mode = ValidationMode::Finetuning;

        for name in ["out.yaml", "out.json", "nested/out.toml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(Config::from_file(&path).unwrap(), config, "{}", name);
        }
    }
}
