//! Background interval rotation

use crossbeam_channel::{select, Receiver, Sender, TrySendError};
use rotalog_core::{Error, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace};

/// Something the interval trigger can rotate
pub trait IntervalTarget: Send + Sync + 'static {
    /// Rotate because the interval elapsed. Errors are the target's to report.
    fn rotate_on_interval(&self);
}

/// Rearms a running [`IntervalTrigger`] to a full interval from now
#[derive(Debug, Clone)]
pub struct TimerReset {
    tx: Sender<()>,
}

impl TimerReset {
    /// Create a reset handle and the receiver to pass to [`IntervalTrigger::spawn`]
    pub fn channel() -> (Self, Receiver<()>) {
        // Pending resets coalesce into one
        let (tx, rx) = crossbeam_channel::bounded(1);
        (Self { tx }, rx)
    }

    pub fn reset(&self) {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => trace!("Interval trigger already stopped"),
        }
    }
}

/// Owned handle to the background rotation thread
pub struct IntervalTrigger {
    shutdown_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl IntervalTrigger {
    /// Start a thread that calls `target.rotate_on_interval()` every `interval`.
    ///
    /// A message on `reset_rx` restarts the wait for a full interval.
    pub fn spawn<T>(target: Arc<T>, interval: Duration, reset_rx: Receiver<()>) -> Result<Self>
    where
        T: IntervalTarget + ?Sized,
    {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("rotalog-interval".to_string())
            .spawn(move || run(target, interval, reset_rx, shutdown_rx))?;

        debug!("Interval trigger started ({:?})", interval);
        Ok(Self {
            shutdown_tx,
            handle,
        })
    }

    /// Signal the thread to exit and wait for it
    pub fn stop(self) -> Result<()> {
        let _ = self.shutdown_tx.try_send(());
        self.handle.join().map_err(|_| Error::TriggerPanicked)?;
        debug!("Interval trigger stopped");
        Ok(())
    }
}

fn run<T>(target: Arc<T>, interval: Duration, reset_rx: Receiver<()>, shutdown_rx: Receiver<()>)
where
    T: IntervalTarget + ?Sized,
{
    loop {
        select! {
            recv(shutdown_rx) -> _ => break,
            recv(reset_rx) -> msg => {
                if msg.is_err() {
                    break;
                }
                trace!("Interval timer rearmed");
            }
            default(interval) => target.rotate_on_interval(),
        }
    }
}
