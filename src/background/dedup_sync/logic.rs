// File: src/background/dedup_sync/logic.rs

use std::sync::Arc;

use crate::error::SyncError;
use crate::traits::{DedupStorage, LeafDedupInfo, LogReader};

/// Backfill the dedup store up to the current integrated log size
///
/// Resumes from the store's contiguous size and feeds leaves to `add` one
/// batch at a time, so a failure leaves every earlier batch recorded.
/// Returns the number of leaves fed.
pub async fn sync_once(
    storage: &Arc<dyn DedupStorage>,
    reader: &Arc<dyn LogReader>,
    batch_size: u64,
) -> Result<u64, SyncError> {
    let batch_size = batch_size.max(1);

    let mut next = {
        let storage = Arc::clone(storage);
        tokio::task::spawn_blocking(move || storage.log_size()).await??
    };
    let target = reader.integrated_size().await?;

    if next >= target {
        tracing::debug!(dedup_size = next, log_size = target, "Dedup store up to date");
        return Ok(0);
    }

    tracing::debug!(from = next, to = target, "Synchronising dedup store");

    let start = next;
    while next < target {
        let count = batch_size.min(target - next);
        let leaves = reader.read_leaves(next, count).await?;
        if leaves.is_empty() {
            return Err(SyncError::ShortRead {
                index: next,
                target,
            });
        }

        // Readers may over-deliver; never record past the target
        let entries: Vec<LeafDedupInfo> = leaves
            .into_iter()
            .take(count as usize)
            .zip(next..)
            .map(|(leaf, idx)| LeafDedupInfo::new(leaf.leaf_id, idx, leaf.timestamp))
            .collect();
        let fed = entries.len() as u64;

        let storage = Arc::clone(storage);
        tokio::task::spawn_blocking(move || storage.add(&entries)).await??;

        next += fed;
        tracing::trace!(next, target, "Dedup batch recorded");
    }

    Ok(next - start)
}
