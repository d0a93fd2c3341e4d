//! List command - shows active and archived log files

use anyhow::Result;
use chrono::{DateTime, Local};
use rotalog_core::{LoggerConfig, ARCHIVE_EXTENSION, LOG_EXTENSION};
use std::fs;
use std::path::Path;

use crate::cli::Cli;
use crate::output::{print_files_table, LogFileEntry, LogFileKind};

pub fn execute(cli: &Cli) -> Result<()> {
    let config = super::resolve_config(cli)?;
    let entries = collect_entries(&config)?;
    print_files_table(&entries);
    Ok(())
}

/// Log files belonging to `config.prefix`, active first, each group sorted by name
pub fn collect_entries(config: &LoggerConfig) -> Result<Vec<LogFileEntry>> {
    let mut entries = scan(
        &config.log_dir,
        &config.prefix,
        &format!(".{}", LOG_EXTENSION),
        LogFileKind::Active,
    )?;
    entries.extend(scan(
        &config.archive_dir(),
        &config.prefix,
        &format!(".{}.{}", LOG_EXTENSION, ARCHIVE_EXTENSION),
        LogFileKind::Archived,
    )?);
    Ok(entries)
}

fn scan(dir: &Path, prefix: &str, suffix: &str, kind: LogFileKind) -> Result<Vec<LogFileEntry>> {
    if !dir.exists() {
        return Ok(vec![]);
    }

    let name_prefix = format!("{}_", prefix);
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(&name_prefix) || !name.ends_with(suffix) {
            continue;
        }

        let modified = metadata
            .modified()
            .ok()
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string());

        entries.push(LogFileEntry {
            kind,
            name,
            size_bytes: metadata.len(),
            modified,
        });
    }

    entries.sort_by(|a, b| sort_key(&a.name, suffix).cmp(&sort_key(&b.name, suffix)));
    Ok(entries)
}

/// Order by base name, then by collision suffix as a number (`_2` before `_10`)
fn sort_key<'a>(name: &'a str, suffix: &str) -> (&'a str, u64) {
    let stem = name.strip_suffix(suffix).unwrap_or(name);
    match stem.rsplit_once('_') {
        Some((base, seq)) if !seq.is_empty() && seq.bytes().all(|b| b.is_ascii_digit()) => {
            (base, seq.parse().unwrap_or(u64::MAX))
        }
        _ => (stem, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_entries() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::new(dir.path(), "app");
        fs::create_dir_all(config.archive_dir()).unwrap();

        fs::write(dir.path().join("app_2024-01-01_00-00-01.log"), b"x\n").unwrap();
        fs::write(dir.path().join("other_2024-01-01_00-00-01.log"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(
            config.archive_dir().join("app_2024-01-01_00-00-00.log.gz"),
            b"",
        )
        .unwrap();

        let entries = collect_entries(&config).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, LogFileKind::Active);
        assert_eq!(entries[0].size_bytes, 2);
        assert_eq!(entries[1].kind, LogFileKind::Archived);
    }

    #[test]
    fn test_collect_entries_missing_dir() {
        let config = LoggerConfig::new("/nonexistent/rotalog", "app");
        assert!(collect_entries(&config).unwrap().is_empty());
    }

    #[test]
    fn test_collision_suffixes_sort_numerically() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::new(dir.path(), "app");
        fs::create_dir_all(config.archive_dir()).unwrap();

        for name in [
            "app_2024-01-01_00-00-00_10.log.gz",
            "app_2024-01-01_00-00-00_2.log.gz",
            "app_2024-01-01_00-00-01.log.gz",
            "app_2024-01-01_00-00-00.log.gz",
            "app_2024-01-01_00-00-00_1.log.gz",
        ] {
            fs::write(config.archive_dir().join(name), b"").unwrap();
        }

        let names: Vec<String> = collect_entries(&config)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "app_2024-01-01_00-00-00.log.gz",
                "app_2024-01-01_00-00-00_1.log.gz",
                "app_2024-01-01_00-00-00_2.log.gz",
                "app_2024-01-01_00-00-00_10.log.gz",
                "app_2024-01-01_00-00-01.log.gz",
            ]
        );
    }
}
