// File: src/background/dedup_sync/config.rs

/// Dedup synchronizer configuration
#[derive(Debug, Clone)]
pub struct DedupSyncConfig {
    /// How often to compare the dedup store with the log (seconds)
    pub interval_secs: u64,

    /// Maximum leaves read from the log per request
    pub batch_size: u64,
}

impl Default for DedupSyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            batch_size: 256, // One full static-ct entry bundle
        }
    }
}

impl DedupSyncConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            interval_secs: std::env::var("CT_DEDUP_SYNC_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.interval_secs),
            batch_size: std::env::var("CT_DEDUP_SYNC_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &u64| *n > 0)
                .unwrap_or(defaults.batch_size),
        }
    }
}
