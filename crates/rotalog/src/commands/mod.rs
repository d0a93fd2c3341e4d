//! Command implementations

pub mod cat;
pub mod demo;
pub mod list;
pub mod pipe;

use anyhow::{Context, Result};
use rotalog_core::{ConfigFile, LoggerConfig, CONFIG_FILES};
use std::path::Path;
use tracing::debug;

use crate::cli::Cli;

/// Build the logger config: defaults, then the config file, then CLI flags
pub fn resolve_config(cli: &Cli) -> Result<LoggerConfig> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    let (mut file, base_dir) = match &cli.config {
        Some(path) => {
            let file = ConfigFile::load(path)?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (file, base)
        }
        None if has_config_file(&cwd) => {
            let (file, path) = ConfigFile::find_and_load(&cwd)?;
            debug!("Loaded config from {}", path.display());
            (file, cwd.clone())
        }
        None => (ConfigFile::default(), cwd.clone()),
    };

    apply_overrides(&mut file, cli);
    Ok(file.into_logger_config(&base_dir)?)
}

fn has_config_file(dir: &Path) -> bool {
    CONFIG_FILES.iter().any(|name| dir.join(name).exists())
}

fn apply_overrides(file: &mut ConfigFile, cli: &Cli) {
    if let Some(dir) = &cli.dir {
        file.log_dir = Some(path_string(dir));
    }
    if let Some(prefix) = &cli.prefix {
        file.prefix = Some(prefix.clone());
    }
    if let Some(format) = cli.format {
        file.format = Some(format.to_string());
    }
    if let Some(max_lines) = cli.max_lines {
        file.max_lines = Some(max_lines);
    }
    if let Some(secs) = cli.interval_secs {
        file.rotation_interval_secs = Some(secs);
        file.rotation_interval_ms = None;
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rotalog_core::LogFormat;
    use std::time::Duration;

    #[test]
    fn test_overrides_win_over_file() {
        let cli = Cli::try_parse_from([
            "rotalog",
            "list",
            "--prefix",
            "cli",
            "--format",
            "json",
            "--interval-secs",
            "5",
        ])
        .unwrap();

        let mut file = ConfigFile {
            prefix: Some("file".to_string()),
            rotation_interval_ms: Some(100),
            ..Default::default()
        };
        apply_overrides(&mut file, &cli);
        let config = file.into_logger_config(Path::new("/srv")).unwrap();

        assert_eq!(config.prefix, "cli");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.rotation_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "log_dir = \"out\"\nmax_lines = 9\n").unwrap();

        let cli = Cli::try_parse_from([
            "rotalog",
            "list",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.log_dir, dir.path().join("out"));
        assert_eq!(config.max_lines, 9);
    }
}
