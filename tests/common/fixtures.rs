//! Test fixtures and store setup utilities

#![allow(dead_code)]

use async_trait::async_trait;
use ct_dedup::storage::DedupStoreConfig;
use ct_dedup::{DedupStore, LeafDedupInfo, LogLeaf, LogReader, SyncError};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Store in a fresh temporary directory
///
/// The directory lives as long as the returned `TempDir`.
pub fn temp_store() -> (TempDir, DedupStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = DedupStore::open(db_path(&dir)).expect("Failed to open store");
    (dir, store)
}

/// Database path inside a temporary directory
pub fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("dedup.db")
}

/// Configuration for a second opener that should give up quickly
pub fn impatient_config(dir: &TempDir) -> DedupStoreConfig {
    DedupStoreConfig {
        busy_timeout_ms: 100,
        ..DedupStoreConfig::at(db_path(dir))
    }
}

/// Deterministic leaf ID for index `i`
pub fn leaf_id(i: u64) -> Vec<u8> {
    let mut id = vec![0xab; 24];
    id.extend_from_slice(&i.to_be_bytes());
    id
}

/// Dedup entry for leaf `i` sequenced at index `i`
pub fn entry(i: u64) -> LeafDedupInfo {
    LeafDedupInfo::new(leaf_id(i), i, 1_700_000_000_000 + i)
}

/// Log contents as a sequence of leaves
pub struct VecLog {
    leaves: Mutex<Vec<LogLeaf>>,
}

impl VecLog {
    pub fn new(n: u64) -> Self {
        Self {
            leaves: Mutex::new(
                (0..n)
                    .map(|i| LogLeaf {
                        leaf_id: leaf_id(i),
                        timestamp: 1_700_000_000_000 + i,
                    })
                    .collect(),
            ),
        }
    }

    /// Append a leaf, returning its index
    pub fn append(&self, leaf: LogLeaf) -> u64 {
        let mut leaves = self.leaves.lock().unwrap();
        leaves.push(leaf);
        leaves.len() as u64 - 1
    }
}

#[async_trait]
impl LogReader for VecLog {
    async fn integrated_size(&self) -> Result<u64, SyncError> {
        Ok(self.leaves.lock().unwrap().len() as u64)
    }

    async fn read_leaves(&self, start: u64, count: u64) -> Result<Vec<LogLeaf>, SyncError> {
        let leaves = self.leaves.lock().unwrap();
        Ok(leaves
            .iter()
            .skip(start as usize)
            .take(count as usize)
            .cloned()
            .collect())
    }
}
