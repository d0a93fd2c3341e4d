//! Compression of retired log files

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rotalog_core::{Result, ARCHIVE_EXTENSION};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Compresses retired log files into the archive directory
#[derive(Debug, Clone)]
pub struct Archiver {
    archive_dir: PathBuf,
    level: Compression,
}

impl Archiver {
    pub fn new(archive_dir: impl Into<PathBuf>, level: u32) -> Self {
        Self {
            archive_dir: archive_dir.into(),
            level: Compression::new(level),
        }
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Where the archive of `source` ends up: `<archive_dir>/<file name>.gz`
    pub fn archive_path(&self, source: &Path) -> PathBuf {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.archive_dir
            .join(format!("{}.{}", name, ARCHIVE_EXTENSION))
    }

    /// Compress `file` (open handle to `path`) into the archive directory,
    /// then close and delete the original.
    ///
    /// The handle is rewound first, so a file that has only ever been
    /// appended to is archived in full. On failure the original file stays
    /// on disk and a partially written archive may be left behind.
    pub fn archive(&self, mut file: File, path: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.archive_dir)?;

        let target = self.archive_path(path);
        file.seek(SeekFrom::Start(0))?;

        let out = File::create(&target)?;
        let mut encoder = GzEncoder::new(BufWriter::new(out), self.level);
        let bytes = io::copy(&mut file, &mut encoder)?;
        let mut writer = encoder.finish()?;
        writer.flush()?;

        drop(file);
        fs::remove_file(path)?;

        debug!(
            "Archived {} ({} bytes) to {}",
            path.display(),
            bytes,
            target.display()
        );
        Ok(target)
    }
}

/// Decompress an archive back into the original bytes
pub fn read_archive(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content)?;
    Ok(content)
}
