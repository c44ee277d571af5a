//! Dedup storage trait definition

use crate::error::StorageResult;

/// Index and timestamp of the SCT issued for a leaf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SctDedupInfo {
    /// Log index assigned to the leaf
    pub idx: u64,

    /// SCT timestamp (milliseconds since epoch)
    pub timestamp: u64,
}

/// One record handed to `DedupStorage::add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDedupInfo {
    /// Certificate hash identifying the leaf
    pub leaf_id: Vec<u8>,

    /// Index and timestamp to record
    pub info: SctDedupInfo,
}

impl LeafDedupInfo {
    pub fn new(leaf_id: impl Into<Vec<u8>>, idx: u64, timestamp: u64) -> Self {
        Self {
            leaf_id: leaf_id.into(),
            info: SctDedupInfo { idx, timestamp },
        }
    }
}

/// Deduplication storage backend
///
/// Records converge to the smallest index ever added per leaf, and
/// `log_size` reports how many leading indices have been accounted for.
pub trait DedupStorage: Send + Sync + 'static {
    /// Record entries, one transaction per entry, in order
    ///
    /// # Errors
    /// * `StorageError::WriteFailed` - carries the index of the first failed
    ///   entry; entries before it are committed, entries after it are not
    ///   attempted
    fn add(&self, entries: &[LeafDedupInfo]) -> StorageResult<()>;

    /// Look up the record for a leaf (`None` if never added)
    fn get(&self, leaf_id: &[u8]) -> StorageResult<Option<SctDedupInfo>>;

    /// Number of leading indices known to be recorded contiguously from 0
    fn log_size(&self) -> StorageResult<u64>;
}
