//! Background task that periodically purges expired sessions

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use curator_core::repositories::KeyValueStore;

pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for the current pass to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("Session sweeper task ended abnormally: {}", e);
        }
    }
}

/// Spawn the sweeper. The first pass runs one `period` after start-up;
/// failed passes are logged and retried on the next tick.
pub fn spawn_sweeper(store: Arc<dyn KeyValueStore>, prefix: String, period: Duration) -> SweeperHandle {
    let (tx, mut rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Session sweeper started (every {}s)", period.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match store.purge_expired(&prefix).await {
                        Ok(0) => {}
                        Ok(removed) => info!("Session sweeper removed {} expired entries", removed),
                        Err(e) => warn!("Session sweep failed: {}", e),
                    }
                }
                changed = rx.changed() => {
                    if changed.is_err() || *rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Session sweeper stopped");
    });

    SweeperHandle { shutdown: tx, task }
}
