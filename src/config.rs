//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\audio-tag\config.toml
//! - macOS: ~/Library/Application Support/audio-tag/config.toml
//! - Linux: ~/.config/audio-tag/config.toml
//!
//! Every setting is only a default for the matching command-line flag; flags
//! given on the command line always win.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output rendering
    pub output: OutputConfig,

    /// Cover export
    pub covers: CoversConfig,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print JSON records instead of text blocks
    pub json: bool,
}

/// Cover export settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoversConfig {
    /// Directory embedded covers are exported to (unset = no export)
    pub export_dir: Option<PathBuf>,

    /// Skip exports that are newer than their audio file
    pub update_only: bool,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("audio-tag"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Read and parse a config file.
///
/// A missing file is `Ok(None)`.
pub fn read(path: &Path) -> Result<Option<Config>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::Read(path.to_path_buf(), e)),
    };

    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Load configuration.
///
/// An explicitly given path must exist and parse. The default location is
/// optional: when it is missing or broken a warning is logged and defaults
/// are used.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        let config = read(path)?.ok_or_else(|| ConfigError::Missing(path.to_path_buf()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        return Ok(config);
    }

    let Some(path) = config_path() else {
        tracing::debug!("Could not determine config directory, using defaults");
        return Ok(Config::default());
    };

    match read(&path) {
        Ok(Some(config)) => {
            tracing::debug!(path = %path.display(), "Loaded config");
            Ok(config)
        }
        Ok(None) => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            tracing::warn!("{}", e);
            tracing::warn!("Using default configuration");
            Ok(Config::default())
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file {0} does not exist")]
    Missing(PathBuf),

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[covers]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.output.json = true;
        config.covers.export_dir = Some(PathBuf::from("/covers"));
        config.covers.update_only = true;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[covers]
export_dir = "/srv/covers"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.covers.export_dir, Some(PathBuf::from("/srv/covers")));
        assert!(!config.covers.update_only);
        assert!(!config.output.json);
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = read(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\njson = true\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert!(config.output.json);
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(load(Some(&path)), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_load_explicit_invalid_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[output\njson = maybe").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
        assert!(err.to_string().contains("broken.toml"));
    }
}
