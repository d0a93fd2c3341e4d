//! Constants and default values for Rotalog

use std::time::Duration;

/// Name of the subdirectory that receives compressed log files
pub const ARCHIVE_DIR: &str = "archive";

/// Extension of an active log file
pub const LOG_EXTENSION: &str = "log";

/// Extension appended to archived files
pub const ARCHIVE_EXTENSION: &str = "gz";

/// Timestamp layout used in log file names (second resolution)
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Default log directory
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Default file name prefix
pub const DEFAULT_PREFIX: &str = "rotalog";

/// Default max lines per file before rotating
pub const DEFAULT_MAX_LINES: usize = 100;

/// Default rotation interval in seconds (1 hour)
pub const DEFAULT_ROTATION_INTERVAL_SECS: u64 = 60 * 60;

/// Default gzip compression level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest gzip compression level
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Capacity of the channel carrying background rotation failures
pub const FAILURE_CHANNEL_CAPACITY: usize = 64;

/// Default config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "rotalog.toml",
    "rotalog.yaml",
    "rotalog.yml",
    "rotalog.json",
];

/// Default rotation interval
pub fn default_rotation_interval() -> Duration {
    Duration::from_secs(DEFAULT_ROTATION_INTERVAL_SECS)
}
