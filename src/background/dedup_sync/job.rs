// File: src/background/dedup_sync/job.rs

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use super::config::DedupSyncConfig;
use super::logic;
use crate::traits::{DedupStorage, LogReader};

/// Dedup synchronizer background job
///
/// Periodically reconciles the dedup store with the authoritative log,
/// covering entries that were sequenced without going through the local
/// write path (other frontends, crashes between sequencing and `add`).
pub struct DedupSync {
    storage: Arc<dyn DedupStorage>,
    reader: Arc<dyn LogReader>,
    config: DedupSyncConfig,
}

impl DedupSync {
    pub fn new(
        storage: Arc<dyn DedupStorage>,
        reader: Arc<dyn LogReader>,
        config: DedupSyncConfig,
    ) -> Self {
        Self {
            storage,
            reader,
            config,
        }
    }

    /// Run the synchronizer as a background task
    ///
    /// Runs until shutdown signal is received via broadcast channel. Failed
    /// ticks are logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: tokio::sync::broadcast::Receiver<()>) {
        let mut ticker = interval(Duration::from_secs(self.config.interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match logic::sync_once(&self.storage, &self.reader, self.config.batch_size).await {
                        Ok(0) => {}
                        Ok(synced) => {
                            tracing::info!(synced, "Dedup store synchronised with log");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Dedup synchronisation failed");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Dedup synchronizer shutting down");
                    break;
                }
            }
        }
    }
}
