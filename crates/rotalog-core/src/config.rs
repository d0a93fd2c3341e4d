//! Logger configuration and config file parsing
//!
//! Config files may be written in any of:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::{LogFormat, NameCollision};

/// Settings for a rotating logger. Immutable once the logger is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Directory receiving active log files
    pub log_dir: PathBuf,
    /// File name prefix (`<prefix>_<timestamp>.log`)
    pub prefix: String,
    /// Line encoding
    pub format: LogFormat,
    /// Lines written before a file is rotated
    pub max_lines: usize,
    /// Time after which a file is rotated regardless of line count
    pub rotation_interval: Duration,
    /// gzip level for archives (0-9)
    pub compression_level: u32,
    /// Handling of same-second file names
    pub on_collision: NameCollision,
}

impl LoggerConfig {
    pub fn new(log_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            log_dir: log_dir.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_rotation_interval(mut self, interval: Duration) -> Self {
        self.rotation_interval = interval;
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_on_collision(mut self, policy: NameCollision) -> Self {
        self.on_collision = policy;
        self
    }

    /// Directory receiving archived files
    pub fn archive_dir(&self) -> PathBuf {
        self.log_dir.join(ARCHIVE_DIR)
    }

    /// Check the invariants the logger relies on
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(Error::config("max_lines must be greater than zero"));
        }
        if self.rotation_interval.is_zero() {
            return Err(Error::config("rotation interval must be greater than zero"));
        }
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(Error::config(format!(
                "compression_level must be between 0 and {}, got {}",
                MAX_COMPRESSION_LEVEL, self.compression_level
            )));
        }
        if self.prefix.is_empty() {
            return Err(Error::config("prefix must not be empty"));
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(Error::config(format!(
                "prefix must not contain path separators: {}",
                self.prefix
            )));
        }
        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            format: LogFormat::default(),
            max_lines: DEFAULT_MAX_LINES,
            rotation_interval: default_rotation_interval(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            on_collision: NameCollision::default(),
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Configuration file structure (rotalog.toml/yaml/json)
///
/// Every field is optional; missing ones fall back to the defaults in
/// [`crate::constants`].
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub log_dir: Option<String>,
    pub prefix: Option<String>,
    /// "json" or "text"
    pub format: Option<String>,
    pub max_lines: Option<usize>,
    pub rotation_interval_secs: Option<u64>,
    /// Sub-second intervals; takes precedence over `rotation_interval_secs`
    pub rotation_interval_ms: Option<u64>,
    pub compression_level: Option<u32>,
    /// "suffix" or "overwrite"
    pub on_collision: Option<String>,
}

impl ConfigFile {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::Config(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Json => serde_json::from_str(content).map_err(Error::Json),
        }
    }

    /// Find and load a config file from a directory
    pub fn find_and_load(dir: &Path) -> Result<(Self, PathBuf)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, path));
            }
        }
        Err(Error::Config(format!(
            "No config file found in {}. Expected one of: {:?}",
            dir.display(),
            CONFIG_FILES
        )))
    }

    /// Convert to a validated [`LoggerConfig`].
    ///
    /// A relative `log_dir` is resolved against `base_dir`.
    pub fn into_logger_config(self, base_dir: &Path) -> Result<LoggerConfig> {
        let defaults = LoggerConfig::default();

        let log_dir = match self.log_dir {
            Some(dir) => {
                let p = Path::new(&dir);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    base_dir.join(p)
                }
            }
            None => base_dir.join(defaults.log_dir),
        };

        let format = match self.format {
            Some(f) => f.parse::<LogFormat>()?,
            None => defaults.format,
        };

        let on_collision = match self.on_collision {
            Some(p) => p.parse::<NameCollision>()?,
            None => defaults.on_collision,
        };

        let rotation_interval = match (self.rotation_interval_ms, self.rotation_interval_secs) {
            (Some(ms), _) => Duration::from_millis(ms),
            (None, Some(secs)) => Duration::from_secs(secs),
            (None, None) => defaults.rotation_interval,
        };

        let config = LoggerConfig {
            log_dir,
            prefix: self.prefix.unwrap_or(defaults.prefix),
            format,
            max_lines: self.max_lines.unwrap_or(defaults.max_lines),
            rotation_interval,
            compression_level: self.compression_level.unwrap_or(defaults.compression_level),
            on_collision,
        };

        config.validate()?;
        Ok(config)
    }
}
