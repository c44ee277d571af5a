// File: src/storage/config.rs

use std::path::PathBuf;

/// SQLite `synchronous` level for the dedup database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Off,
    Normal,
    Full,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Off => "OFF",
            SyncMode::Normal => "NORMAL",
            SyncMode::Full => "FULL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Some(SyncMode::Off),
            "normal" => Some(SyncMode::Normal),
            "full" => Some(SyncMode::Full),
            _ => None,
        }
    }
}

/// Dedup store configuration
#[derive(Debug, Clone)]
pub struct DedupStoreConfig {
    /// Path to the database file
    pub path: PathBuf,

    /// Enable WAL journaling
    pub wal_mode: bool,

    /// How long to wait on a locked database (milliseconds)
    pub busy_timeout_ms: u32,

    /// Hold an exclusive file lock for the lifetime of the handle
    pub exclusive_lock: bool,

    /// Durability of commits
    pub synchronous: SyncMode,
}

impl Default for DedupStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./dedup.db"),
            wal_mode: true,
            busy_timeout_ms: 5000,
            exclusive_lock: true,
            // Every committed record must survive a crash
            synchronous: SyncMode::Full,
        }
    }
}

impl DedupStoreConfig {
    /// Default configuration for the given path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Dedup store statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupStats {
    /// Records in the dedup bucket
    pub leaf_count: u64,

    /// Contiguous size counter
    pub log_size: u64,

    /// Database file size in bytes (0 for in-memory stores)
    pub file_size: u64,
}
