//! Log file naming

use chrono::{DateTime, TimeZone};
use rotalog_core::{
    LoggerConfig, NameCollision, ARCHIVE_EXTENSION, FILENAME_TIMESTAMP_FORMAT, LOG_EXTENSION,
};
use std::fmt::Display;
use std::path::PathBuf;

/// Base name without extension: `<prefix>_<YYYY-MM-DD_HH-MM-SS>`
pub fn base_name<Tz>(prefix: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}_{}", prefix, now.format(FILENAME_TIMESTAMP_FORMAT))
}

/// Pick the path for the next active file.
///
/// With [`NameCollision::Suffix`] a numeric suffix is appended while either
/// the log file or its archive already exists. [`NameCollision::Overwrite`]
/// always returns the bare name.
pub fn next_log_path<Tz>(config: &LoggerConfig, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let base = base_name(&config.prefix, now);
    let archive_dir = config.archive_dir();

    let mut seq = 0u32;
    loop {
        let stem = if seq == 0 {
            base.clone()
        } else {
            format!("{}_{}", base, seq)
        };
        let file_name = format!("{}.{}", stem, LOG_EXTENSION);
        let path = config.log_dir.join(&file_name);

        if config.on_collision == NameCollision::Overwrite {
            return path;
        }

        let archived = archive_dir.join(format!("{}.{}", file_name, ARCHIVE_EXTENSION));
        if !path.exists() && !archived.exists() {
            return path;
        }
        seq += 1;
    }
}
