// File: src/background/mod.rs

//! Background jobs
//!
//! The dedup synchronizer keeps the dedup store caught up with the
//! authoritative log. Jobs never block the write path.

pub mod config;
pub mod dedup_sync;

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::traits::{DedupStorage, LogReader};

pub use config::BackgroundConfig;
pub use dedup_sync::DedupSync;

/// Background job runner
pub struct BackgroundJobRunner {
    storage: Arc<dyn DedupStorage>,
    reader: Arc<dyn LogReader>,
    config: BackgroundConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl BackgroundJobRunner {
    pub fn new(
        storage: Arc<dyn DedupStorage>,
        reader: Arc<dyn LogReader>,
        config: BackgroundConfig,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            storage,
            reader,
            config,
            shutdown_tx,
        }
    }

    /// Start all background jobs
    pub fn start(&self) -> Vec<tokio::task::JoinHandle<()>> {
        if self.config.disabled {
            tracing::info!("Background jobs disabled via CT_DEDUP_BACKGROUND_DISABLED=true");
            return vec![];
        }

        let job = DedupSync::new(
            Arc::clone(&self.storage),
            Arc::clone(&self.reader),
            self.config.dedup_sync.clone(),
        );
        let shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            job.run(shutdown_rx).await;
        });
        tracing::info!(
            interval_secs = self.config.dedup_sync.interval_secs,
            batch_size = self.config.dedup_sync.batch_size,
            "Dedup synchronizer started"
        );

        vec![handle]
    }

    /// Signal all jobs to shutdown gracefully
    pub fn shutdown(&self) {
        tracing::info!("Signaling background jobs to shutdown");
        let _ = self.shutdown_tx.send(());
    }
}
