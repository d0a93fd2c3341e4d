//! Rotalog Logs - Rotating log writer with gzip archiving
//!
//! A [`Logger`] appends encoded records to an active file and rotates it when
//! either the line threshold is reached or the rotation interval elapses.
//! Retired files are compressed into `<log_dir>/archive/` and removed.

mod archive;
mod encoder;
mod logger;
pub mod naming;
mod trigger;

pub use archive::{read_archive, Archiver};
pub use encoder::Encoder;
pub use logger::{Clock, Logger, RotationFailure, RotationReason};
pub use trigger::{IntervalTarget, IntervalTrigger, TimerReset};
