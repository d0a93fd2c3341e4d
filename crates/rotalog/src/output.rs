//! Terminal output formatting

use colored::Colorize;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

/// A log file on disk, active or archived
#[derive(Debug, Clone, Serialize)]
pub struct LogFileEntry {
    pub kind: LogFileKind,
    pub name: String,
    pub size_bytes: u64,
    pub modified: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFileKind {
    Active,
    Archived,
}

#[derive(Tabled)]
struct LogFileRow {
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "size")]
    size: String,
    #[tabled(rename = "modified")]
    modified: String,
}

impl From<&LogFileEntry> for LogFileRow {
    fn from(entry: &LogFileEntry) -> Self {
        let kind = match entry.kind {
            LogFileKind::Active => "active".green().to_string(),
            LogFileKind::Archived => "archived".cyan().to_string(),
        };

        LogFileRow {
            kind,
            name: entry.name.clone(),
            size: format_bytes(entry.size_bytes),
            modified: entry.modified.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn print_files_table(entries: &[LogFileEntry]) {
    if is_json_mode() {
        match serde_json::to_string_pretty(entries) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing to JSON: {}", e),
        }
        return;
    }

    if entries.is_empty() {
        println!("{}", "No log files found".dimmed());
        return;
    }

    let rows: Vec<LogFileRow> = entries.iter().map(LogFileRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()));
    println!("{}", table);
}

pub fn print_success(msg: &str) {
    if is_json_mode() {
        println!("{}", serde_json::json!({ "status": "ok", "message": msg }));
    } else {
        println!("{} {}", "✓".green(), msg);
    }
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Format bytes to human readable
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}gb", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}mb", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}kb", bytes as f64 / KB as f64)
    } else {
        format!("{}b", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512b");
        assert_eq!(format_bytes(2048), "2.0kb");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0mb");
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = LogFileEntry {
            kind: LogFileKind::Archived,
            name: "app_2024-01-01_00-00-00.log.gz".to_string(),
            size_bytes: 20,
            modified: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "archived");
        assert_eq!(json["size_bytes"], 20);
    }
}
