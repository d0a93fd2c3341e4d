//! Cat command - decompresses an archive to stdout

use anyhow::{Context, Result};
use rotalog_logs::read_archive;
use std::io::Write;
use std::path::Path;

pub fn execute(archive: &Path) -> Result<()> {
    let content = read_archive(archive)
        .with_context(|| format!("Failed to read archive {}", archive.display()))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}
