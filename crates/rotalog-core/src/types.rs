//! Core type definitions for Rotalog

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Output format of a log line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON document per line
    Json,
    /// `Display` rendering of the record
    #[default]
    Text,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Text => "text",
        }
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to do when a new log file name is already taken.
///
/// File names carry a timestamp with one-second resolution, so two
/// rotations within the same second produce the same base name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NameCollision {
    /// Append `_1`, `_2`, ... until neither the log file nor its archive exists
    #[default]
    Suffix,
    /// Reuse the bare name; the newer file replaces the older one
    Overwrite,
}

impl NameCollision {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameCollision::Suffix => "suffix",
            NameCollision::Overwrite => "overwrite",
        }
    }
}

impl FromStr for NameCollision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "suffix" => Ok(NameCollision::Suffix),
            "overwrite" => Ok(NameCollision::Overwrite),
            _ => Err(Error::config(format!(
                "Invalid collision policy: {} (expected suffix or overwrite)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for NameCollision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
