//! ct-dedup library exports
//!
//! SCT deduplication storage for Certificate Transparency logs: maps each
//! certificate hash to the smallest log index (and its timestamp) ever
//! assigned to it, and tracks how far the store has caught up with the log.

pub mod background;
pub mod cert;
pub mod config;
pub mod error;
pub mod storage;
pub mod traits;

// Re-exports
pub use error::{CodecError, StorageError, StorageResult, SyncError};
pub use storage::{DedupStore, DedupStoreConfig};
pub use traits::{DedupStorage, LeafDedupInfo, LogLeaf, LogReader, SctDedupInfo};
