//! Process configuration

use std::path::PathBuf;

use crate::background::BackgroundConfig;
use crate::storage::{DedupStoreConfig, SyncMode};

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Dedup store settings
    pub store: DedupStoreConfig,
    pub log_level: String,
    pub background: BackgroundConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: DedupStoreConfig::default(),
            log_level: "info".to_string(),
            background: BackgroundConfig::default(),
        }
    }
}

impl Config {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = DedupStoreConfig::default();

        let store = DedupStoreConfig {
            path: std::env::var("CT_DEDUP_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.path),
            wal_mode: std::env::var("CT_DEDUP_WAL")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.wal_mode),
            busy_timeout_ms: std::env::var("CT_DEDUP_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.busy_timeout_ms),
            exclusive_lock: defaults.exclusive_lock,
            synchronous: std::env::var("CT_DEDUP_SYNCHRONOUS")
                .ok()
                .and_then(|s| SyncMode::parse(&s))
                .unwrap_or(defaults.synchronous),
        };

        Self {
            store,
            log_level: std::env::var("CT_DEDUP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            background: BackgroundConfig::from_env(),
        }
    }
}
