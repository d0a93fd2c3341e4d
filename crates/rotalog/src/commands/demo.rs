//! Demo command - writes generated sample records

use anyhow::{Context, Result};
use rotalog_logs::Logger;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::cli::{Cli, DemoArgs};
use crate::output::{print_success, print_warning};

/// Record written by the demo
#[derive(Debug, Serialize)]
pub struct SampleData {
    pub id: u32,
    pub name: String,
}

impl fmt::Display for SampleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

pub async fn execute(cli: &Cli, args: &DemoArgs) -> Result<()> {
    let config = super::resolve_config(cli)?;
    let records = args.records;
    let pause_every = args.pause_every;
    let pause = Duration::from_millis(args.pause_ms);

    let summary = tokio::task::spawn_blocking(move || -> Result<(u32, u64)> {
        let logger = Logger::new(config).context("Failed to create logger")?;

        for i in 0..records {
            debug!("Logging data {}", i);
            let data = SampleData {
                id: i,
                name: format!("Sample Name {}", i),
            };
            logger
                .log(&data)
                .with_context(|| format!("Failed to log record {}", i))?;

            // Filenames have one-second resolution; pacing keeps them apart
            if pause_every > 0 && (i + 1) % pause_every == 0 {
                std::thread::sleep(pause);
            }
        }

        for failure in logger.rotation_failures().try_iter() {
            print_warning(&format!(
                "{} rotation failed at {}: {}",
                failure.reason, failure.at, failure.error
            ));
        }

        let rotations = logger.rotation_count();
        logger.shutdown()?;
        Ok((records, rotations))
    })
    .await??;

    print_success(&format!(
        "Logged {} records ({} files opened)",
        summary.0, summary.1
    ));
    Ok(())
}
