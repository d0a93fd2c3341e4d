//! Record encoding

use rotalog_core::{LogFormat, Result};
use serde::Serialize;
use std::fmt::Display;

/// Turns a record into a single output line (without the trailing newline)
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    format: LogFormat,
}

impl Encoder {
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Encode a record. Only JSON serialization can fail.
    pub fn encode<R>(&self, record: &R) -> Result<String>
    where
        R: Serialize + Display + ?Sized,
    {
        match self.format {
            LogFormat::Json => Ok(serde_json::to_string(record)?),
            LogFormat::Text => Ok(record.to_string()),
        }
    }
}
