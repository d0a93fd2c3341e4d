//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use rotalog_core::LogFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rotalog")]
#[command(version, about = "Rotating log writer with gzip archiving")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (.toml, .yaml, .yml, .json); defaults to rotalog.* in the current directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log directory
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// File name prefix
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Line format: json or text
    #[arg(long, global = true, value_parser = parse_format)]
    pub format: Option<LogFormat>,

    /// Lines per file before rotating
    #[arg(long, global = true)]
    pub max_lines: Option<usize>,

    /// Seconds between interval rotations
    #[arg(long, global = true)]
    pub interval_secs: Option<u64>,

    /// Output in JSON format instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write generated sample records
    Demo(DemoArgs),

    /// Log each line read from stdin until EOF or Ctrl-C
    Pipe,

    /// List active and archived log files
    List,

    /// Decompress an archived log file to stdout
    Cat {
        /// Path to a .gz archive
        archive: PathBuf,
    },
}

#[derive(Args)]
pub struct DemoArgs {
    /// Number of records to write
    #[arg(long, default_value = "726")]
    pub records: u32,

    /// Pause after this many records (0 disables pausing)
    #[arg(long, default_value = "100")]
    pub pause_every: u32,

    /// Pause length in milliseconds
    #[arg(long, default_value = "1000")]
    pub pause_ms: u64,
}

/// Parse a log format name
fn parse_format(s: &str) -> Result<LogFormat, String> {
    s.parse::<LogFormat>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("json").unwrap(), LogFormat::Json);
        assert_eq!(parse_format("Text").unwrap(), LogFormat::Text);
        assert_eq!(parse_format("xml").unwrap_err(), "Unsupported log format: xml");
    }

    #[test]
    fn test_cli_parses_global_overrides() {
        let cli = Cli::try_parse_from([
            "rotalog",
            "demo",
            "--records",
            "5",
            "--dir",
            "/tmp/logs",
            "--max-lines",
            "2",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(cli.max_lines, Some(2));
        assert_eq!(cli.format, Some(LogFormat::Json));
        match cli.command {
            Commands::Demo(args) => {
                assert_eq!(args.records, 5);
                assert_eq!(args.pause_every, 100);
            }
            _ => panic!("expected demo command"),
        }
    }
}
