//! Rotation engine

use chrono::{DateTime, Local, Utc};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use rotalog_core::{Error, LoggerConfig, Result, FAILURE_CHANNEL_CAPACITY};
use serde::Serialize;
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::archive::Archiver;
use crate::encoder::Encoder;
use crate::naming;
use crate::trigger::{IntervalTarget, IntervalTrigger, TimerReset};

/// Why a rotation happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationReason {
    /// First file opened by [`Logger::new`]
    Startup,
    /// Line counter reached `max_lines`
    LineThreshold,
    /// Rotation interval elapsed
    Interval,
    /// Requested through [`Logger::rotate`]
    Manual,
}

impl RotationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationReason::Startup => "startup",
            RotationReason::LineThreshold => "line-threshold",
            RotationReason::Interval => "interval",
            RotationReason::Manual => "manual",
        }
    }
}

impl std::fmt::Display for RotationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A background rotation that failed with nobody waiting on it
#[derive(Debug)]
pub struct RotationFailure {
    pub reason: RotationReason,
    pub at: DateTime<Utc>,
    pub error: Error,
}

struct ActiveFile {
    file: File,
    path: PathBuf,
}

/// Everything that changes on rotation, guarded as one unit
struct State {
    active: Option<ActiveFile>,
    line_count: usize,
    rotations: u64,
}

/// Source of the timestamps used in file names
pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

struct Shared {
    config: LoggerConfig,
    clock: Clock,
    encoder: Encoder,
    archiver: Archiver,
    state: Mutex<State>,
    timer: TimerReset,
    failures_tx: Sender<RotationFailure>,
}

impl Shared {
    /// Archive the current file (if any) and open a fresh one. Caller holds the lock.
    fn rotate_locked(&self, state: &mut State, reason: RotationReason) -> Result<()> {
        if let Some(active) = state.active.take() {
            if let Err(e) = self.archiver.archive(active.file, &active.path) {
                error!(
                    "Failed to archive {} ({} rotation): {}",
                    active.path.display(),
                    reason,
                    e
                );
                return Err(e);
            }
        }

        let path = naming::next_log_path(&self.config, &(self.clock)());
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        debug!("Rotated log ({}): now writing {}", reason, path.display());

        state.active = Some(ActiveFile { file, path });
        state.line_count = 0;
        state.rotations += 1;

        if matches!(reason, RotationReason::LineThreshold | RotationReason::Manual) {
            self.timer.reset();
        }
        Ok(())
    }

    fn report_failure(&self, failure: RotationFailure) {
        match self.failures_tx.try_send(failure) {
            Ok(()) => {}
            Err(TrySendError::Full(failure)) => {
                warn!(
                    "Rotation failure channel full, dropping report: {}",
                    failure.error
                );
            }
            // The logger owns a receiver, so this only happens mid-teardown
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

impl IntervalTarget for Shared {
    fn rotate_on_interval(&self) {
        let result = {
            let mut state = self.state.lock();
            self.rotate_locked(&mut state, RotationReason::Interval)
        };

        if let Err(error) = result {
            warn!("Interval rotation failed: {}", error);
            self.report_failure(RotationFailure {
                reason: RotationReason::Interval,
                at: Utc::now(),
                error,
            });
        }
    }
}

/// Rotating log writer.
///
/// Records are appended to `<log_dir>/<prefix>_<timestamp>.log`. The file is
/// rotated after `max_lines` lines and every `rotation_interval`, whichever
/// comes first; both kinds of rotation rearm the interval. Retired files are
/// gzip-compressed into `<log_dir>/archive/`.
///
/// All writes and rotations are serialized by a single lock, so a line never
/// straddles two files.
pub struct Logger {
    shared: Arc<Shared>,
    failures_rx: Receiver<RotationFailure>,
    trigger: Option<IntervalTrigger>,
}

impl Logger {
    /// Create the log directory if needed, open the first file and start the
    /// interval trigger.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::with_clock(config, Local::now)
    }

    /// Like [`Logger::new`], with file name timestamps taken from `clock`
    pub fn with_clock<F>(config: LoggerConfig, clock: F) -> Result<Self>
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        config.validate()?;

        if !config.log_dir.exists() {
            fs::create_dir_all(&config.log_dir)?;
            info!("Created log directory: {}", config.log_dir.display());
        }

        let (timer, reset_rx) = TimerReset::channel();
        let (failures_tx, failures_rx) = crossbeam_channel::bounded(FAILURE_CHANNEL_CAPACITY);

        let shared = Arc::new(Shared {
            encoder: Encoder::new(config.format),
            archiver: Archiver::new(config.archive_dir(), config.compression_level),
            state: Mutex::new(State {
                active: None,
                line_count: 0,
                rotations: 0,
            }),
            timer,
            failures_tx,
            clock: Box::new(clock),
            config,
        });

        {
            let mut state = shared.state.lock();
            shared.rotate_locked(&mut state, RotationReason::Startup)?;
        }

        let interval = shared.config.rotation_interval;
        let trigger = IntervalTrigger::spawn(Arc::clone(&shared), interval, reset_rx)?;

        info!(
            "Logger started in {} (format: {}, max lines: {}, interval: {:?})",
            shared.config.log_dir.display(),
            shared.config.format,
            shared.config.max_lines,
            interval
        );

        Ok(Self {
            shared,
            failures_rx,
            trigger: Some(trigger),
        })
    }

    /// Append one record as a line, rotating if the line threshold is reached.
    ///
    /// Encoding happens before anything is written, so an encoding error
    /// leaves the file untouched. Errors from a threshold rotation are
    /// returned here even though the line itself was written.
    pub fn log<R>(&self, record: &R) -> Result<()>
    where
        R: Serialize + Display + ?Sized,
    {
        let mut line = self.shared.encoder.encode(record)?;
        line.push('\n');

        let mut state = self.shared.state.lock();
        let active = state.active.as_mut().ok_or(Error::NoActiveFile)?;
        active.file.write_all(line.as_bytes())?;

        state.line_count += 1;
        if state.line_count >= self.shared.config.max_lines {
            self.shared
                .rotate_locked(&mut state, RotationReason::LineThreshold)?;
        }
        Ok(())
    }

    /// Rotate now, independent of line count and interval
    pub fn rotate(&self) -> Result<()> {
        let mut state = self.shared.state.lock();
        self.shared.rotate_locked(&mut state, RotationReason::Manual)
    }

    /// Lines written to the active file
    pub fn line_count(&self) -> usize {
        self.shared.state.lock().line_count
    }

    /// Path of the active file; `None` after a failed rotation
    pub fn active_path(&self) -> Option<PathBuf> {
        self.shared
            .state
            .lock()
            .active
            .as_ref()
            .map(|a| a.path.clone())
    }

    /// Successful rotations so far, including the one at startup
    pub fn rotation_count(&self) -> u64 {
        self.shared.state.lock().rotations
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.shared.config
    }

    /// Where `path` is archived when it is rotated out
    pub fn archive_path(&self, path: &Path) -> PathBuf {
        self.shared.archiver.archive_path(path)
    }

    /// Failures of interval rotations, for the owner to drain
    pub fn rotation_failures(&self) -> Receiver<RotationFailure> {
        self.failures_rx.clone()
    }

    /// Stop the interval trigger and sync the active file to disk.
    ///
    /// The active file is left in place; it is not archived.
    pub fn shutdown(mut self) -> Result<()> {
        if let Some(trigger) = self.trigger.take() {
            trigger.stop()?;
        }

        let state = self.shared.state.lock();
        if let Some(active) = state.active.as_ref() {
            active.file.sync_all()?;
        }
        info!("Logger shut down ({} rotations)", state.rotations);
        Ok(())
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(trigger) = self.trigger.take() {
            if let Err(e) = trigger.stop() {
                warn!("Failed to stop interval trigger: {}", e);
            }
        }
    }
}
