//! Pipe command - logs stdin line by line

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use rotalog_logs::{Logger, RotationFailure};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::output::{print_success, print_warning};

/// How often background rotation failures are reported while stdin is idle
const FAILURE_POLL: Duration = Duration::from_millis(250);

pub async fn execute(cli: &Cli) -> Result<()> {
    let config = super::resolve_config(cli)?;
    let logger = Logger::new(config).context("Failed to create logger")?;
    let failures = logger.rotation_failures();

    let mut reader = BufReader::new(tokio::io::stdin());
    // Survives a lost select race, so a partially read line is never dropped
    let mut buf = Vec::new();
    let mut ticker = tokio::time::interval(FAILURE_POLL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut count = 0u64;

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => {
                if read? == 0 {
                    debug!("stdin closed");
                    break;
                }
                let line = decode_line(&buf);
                // Rotation compresses under the lock; keep it off the async workers
                tokio::task::block_in_place(|| logger.log(&*line))?;
                buf.clear();
                count += 1;
            }
            _ = ticker.tick() => drain_failures(&failures),
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down...");
                break;
            }
        }
    }

    // Interrupted mid-line: keep what was read
    if !buf.is_empty() {
        let line = decode_line(&buf);
        tokio::task::block_in_place(|| logger.log(&*line))?;
        count += 1;
    }

    drain_failures(&failures);
    logger.shutdown()?;
    print_success(&format!("Logged {} lines", count));
    Ok(())
}

/// Strip the line terminator; invalid UTF-8 becomes U+FFFD
fn decode_line(raw: &[u8]) -> std::borrow::Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

fn drain_failures(failures: &Receiver<RotationFailure>) {
    for failure in failures.try_iter() {
        print_warning(&format!(
            "{} rotation failed at {}: {}",
            failure.reason, failure.at, failure.error
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line(b"plain\n"), "plain");
        assert_eq!(decode_line(b"crlf\r\n"), "crlf");
        assert_eq!(decode_line(b"no newline"), "no newline");
        assert_eq!(decode_line(b"bad \xff byte\n"), "bad \u{FFFD} byte");
    }
}
