//! Background reclamation of expired pastes.
//!
//! The sweeper alternates between sleeping and scanning: on each timer
//! fire it lists every stored paste, deletes the expired ones, and goes
//! back to sleep. Nothing inside a sweep is fatal; every failure becomes
//! an event and the next tick runs regardless.

use crate::core::PasteError;
use crate::event::{Event, EventSender};
use crate::policy;
use crate::store::PasteStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;

const SOURCE: &str = "sweeper";

const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// How often the sweeper wakes up.
#[derive(Debug, Clone)]
pub struct SweeperOpts {
    pub interval: Duration,
}

impl SweeperOpts {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Read the interval from `PASTEBOX_SWEEP_INTERVAL_SECS`, falling
    /// back to the one-hour default when the variable is absent.
    pub fn from_env() -> crate::core::Result<Self> {
        match std::env::var("PASTEBOX_SWEEP_INTERVAL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    PasteError::Config(format!(
                        "PASTEBOX_SWEEP_INTERVAL_SECS must be a number of seconds, got '{raw}'"
                    ))
                })?;
                Ok(Self::new(Duration::from_secs(secs)))
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for SweeperOpts {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_INTERVAL_SECS))
    }
}

/// Outcome of one sweep pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub scanned: usize,
    pub deleted: usize,
    pub failed: usize,
}

pub struct Sweeper {
    store: Arc<dyn PasteStore>,
    events: EventSender,
}

impl Sweeper {
    pub fn new(store: Arc<dyn PasteStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    /// Run one full pass over the store.
    ///
    /// A failed `list_all` aborts the pass (there is nothing to iterate)
    /// and is reported as an error event. Per-paste delete failures are
    /// reported individually and never stop the scan.
    pub async fn sweep(&self) -> SweepStats {
        let pastes = match self.store.list_all().await {
            Ok(pastes) => pastes,
            Err(err) => {
                self.events
                    .send(Event::error(format!("sweep aborted, list failed: {err}"), SOURCE))
                    .await;
                return SweepStats::default();
            }
        };

        let now = Utc::now();
        let mut stats = SweepStats { scanned: pastes.len(), ..SweepStats::default() };
        for paste in &pastes {
            if !policy::is_expired(paste, now) {
                continue;
            }
            match self.store.delete(&paste.id).await {
                Ok(()) => {
                    stats.deleted += 1;
                    self.events
                        .send(Event::debug(format!("deleted expired paste {}", paste.id), SOURCE))
                        .await;
                }
                Err(err) => {
                    stats.failed += 1;
                    self.events
                        .send(Event::warning(
                            format!("failed to delete expired paste {}: {err}", paste.id),
                            SOURCE,
                        ))
                        .await;
                }
            }
        }

        self.events
            .send(Event::info(
                format!(
                    "sweep complete: scanned {}, deleted {}, failed {}",
                    stats.scanned, stats.deleted, stats.failed
                ),
                SOURCE,
            ))
            .await;
        stats
    }

    /// Spawn the perpetual sleep/sweep loop.
    ///
    /// The loop runs until the returned handle is stopped or dropped; the
    /// stop signal is observed between sweeps, so a pass in flight
    /// completes before the task exits.
    pub fn spawn(self, opts: SweeperOpts) -> SweeperHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let join_handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        break;
                    }
                    _ = sleep(opts.interval) => {
                        self.sweep().await;
                    }
                }
            }
        });

        SweeperHandle { stop_tx: Some(stop_tx), join_handle: Some(join_handle) }
    }
}

/// Owner of the background sweep task.
pub struct SweeperHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Signal the loop to stop and wait for it to finish.
    pub async fn stop(mut self) -> crate::core::Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(join_handle) = self.join_handle.take() {
            join_handle
                .await
                .map_err(|err| PasteError::Internal(format!("sweeper join: {err}")))?;
        }
        Ok(())
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(join_handle) = self.join_handle.take() {
            join_handle.abort();
        }
    }
}
