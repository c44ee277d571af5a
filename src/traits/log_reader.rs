//! Async read access to the authoritative log, used for backfill

use async_trait::async_trait;

use crate::error::SyncError;

/// A sequenced leaf as seen in the authoritative log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLeaf {
    /// Certificate hash identifying the leaf
    pub leaf_id: Vec<u8>,

    /// SCT timestamp issued for the leaf (milliseconds since epoch)
    pub timestamp: u64,
}

/// Reader over the integrated log
///
/// Implementations typically fetch entry bundles over HTTP; the backfill job
/// only relies on ordering: the i-th leaf returned by `read_leaves(start, _)`
/// has index `start + i`.
#[async_trait]
pub trait LogReader: Send + Sync + 'static {
    /// Current integrated size of the log
    async fn integrated_size(&self) -> Result<u64, SyncError>;

    /// Read up to `count` leaves starting at index `start`
    ///
    /// May return fewer leaves than requested; an empty result means no
    /// progress could be made.
    async fn read_leaves(&self, start: u64, count: u64) -> Result<Vec<LogLeaf>, SyncError>;
}
