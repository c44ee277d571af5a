// File: src/storage/dedup/store.rs

use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::{codec, leaf_idx, log_size, schema};
use crate::error::{StorageError, StorageResult};
use crate::storage::config::{DedupStats, DedupStoreConfig, SyncMode};
use crate::traits::{DedupStorage, LeafDedupInfo, SctDedupInfo};

/// SQLite-backed dedup store
///
/// Holds two buckets:
/// - `leafIdx` stores `<leafID, {idx, timestamp}>`. Entries are added after
///   sequencing, by the server that received the request, or later when the
///   dedup store is synchronised with the log.
/// - `logSize` holds `<"size", N>`, where every index in `[0, N)` has been
///   added. Synchronisation resumes from `N`.
///
/// `add` only ever lowers the stored index of a leaf.
pub struct DedupStore {
    /// Database connection (rusqlite connections are not `Sync`)
    conn: Mutex<Connection>,

    config: DedupStoreConfig,
}

impl DedupStore {
    /// Open or create a store at `path` with default configuration
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(DedupStoreConfig::at(path.as_ref()))
    }

    /// Open or create a store with custom configuration
    ///
    /// Fails if the file cannot be opened or locked, or if exactly one of the
    /// two buckets exists.
    pub fn with_config(config: DedupStoreConfig) -> StorageResult<Self> {
        let mut conn = Connection::open(&config.path).map_err(|e| {
            StorageError::ConnectionFailed(format!(
                "failed to open {}: {}",
                config.path.display(),
                e
            ))
        })?;

        Self::configure_connection(&conn, &config).map_err(|e| {
            StorageError::ConnectionFailed(format!(
                "failed to configure {}: {}",
                config.path.display(),
                e
            ))
        })?;
        Self::initialize(&mut conn)?;

        tracing::debug!(path = %config.path.display(), "Dedup store opened");

        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(DedupStoreConfig {
            path: ":memory:".into(),
            wal_mode: false,
            exclusive_lock: false,
            synchronous: SyncMode::Off,
            ..Default::default()
        })
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &DedupStoreConfig) -> rusqlite::Result<()> {
        conn.busy_timeout(Duration::from_millis(u64::from(config.busy_timeout_ms)))?;

        // Must be set before the first access so the lock taken by
        // `initialize` is kept until the connection closes.
        if config.exclusive_lock {
            conn.pragma_update_and_check(None, "locking_mode", "EXCLUSIVE", |row| {
                row.get::<_, String>(0)
            })?;
        }
        if config.wal_mode {
            let mode: String =
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
            tracing::trace!(journal_mode = %mode, "Journal mode set");
        }
        conn.pragma_update(None, "synchronous", config.synchronous.as_str())?;
        Ok(())
    }

    /// Create both buckets, or check that both exist, in one write transaction
    fn initialize(conn: &mut Connection) -> StorageResult<()> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        schema::ensure_buckets(&tx)?;
        tx.commit()?;
        Ok(())
    }

    /// Get locked connection for internal operations
    fn get_conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::ConnectionFailed("lock poisoned".into()))
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Record entries in the dedup bucket and advance the size counter
    ///
    /// Each entry is applied in its own transaction, in order. An existing
    /// record is only replaced by one with a strictly smaller index. Stops at
    /// the first failure and reports that entry's index.
    pub fn add(&self, entries: &[LeafDedupInfo]) -> StorageResult<()> {
        for entry in entries {
            self.add_one(entry).map_err(|e| {
                tracing::warn!(index = entry.info.idx, error = %e, "Failed to record leaf");
                StorageError::WriteFailed {
                    index: entry.info.idx,
                    source: Box::new(e),
                }
            })?;
        }
        Ok(())
    }

    fn add_one(&self, entry: &LeafDedupInfo) -> StorageResult<()> {
        let LeafDedupInfo { leaf_id, info } = entry;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let size = log_size::current_size(&tx)?;

        let stored_idx = match leaf_idx::get_raw(&tx, leaf_id)? {
            Some(raw) => match codec::decode_value(&raw) {
                Ok((idx, _)) => Some(idx),
                Err(e) => {
                    tracing::warn!(
                        leaf_id = %hex::encode(leaf_id),
                        error = %e,
                        "Overwriting undecodable dedup value"
                    );
                    None
                }
            },
            None => None,
        };

        match stored_idx {
            Some(stored) if stored <= info.idx => {
                tracing::trace!(
                    leaf_id = %hex::encode(leaf_id),
                    stored,
                    new = info.idx,
                    "Bucket already holds a smaller or equal index, not updating"
                );
            }
            _ => leaf_idx::put(&tx, leaf_id, info.idx, info.timestamp)?,
        }

        // size is a length and idx an index: equality means idx is the next
        // contiguous one, whether or not it won the tie-break above.
        log_size::advance_if_contiguous(&tx, info.idx, size)?;

        tx.commit()?;
        Ok(())
    }

    /// Read the record for a leaf
    ///
    /// Returns `Ok(None)` if the leaf was never added.
    pub fn get(&self, leaf_id: &[u8]) -> StorageResult<Option<SctDedupInfo>> {
        let conn = self.get_conn()?;
        leaf_idx::get(&conn, leaf_id)
    }

    /// Read the contiguous size counter
    pub fn log_size(&self) -> StorageResult<u64> {
        let conn = self.get_conn()?;
        log_size::current_size(&conn)
    }

    /// Get store statistics from a single snapshot
    pub fn stats(&self) -> StorageResult<DedupStats> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let leaf_count = leaf_idx::count(&tx)?;
        let log_size = log_size::current_size(&tx)?;
        tx.commit()?;
        drop(conn);

        Ok(DedupStats {
            leaf_count,
            log_size,
            file_size: self.file_size()?,
        })
    }

    /// Database file size, including a WAL file not yet checkpointed
    fn file_size(&self) -> StorageResult<u64> {
        let path = &self.config.path;
        if path.as_os_str() == ":memory:" {
            return Ok(0);
        }

        let mut wal = path.clone().into_os_string();
        wal.push("-wal");
        let wal_size = match std::fs::metadata(&wal) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };

        Ok(std::fs::metadata(path)?.len() + wal_size)
    }

    /// Close the store and release the file lock
    pub fn close(self) -> StorageResult<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| StorageError::ConnectionFailed("lock poisoned".into()))?;
        conn.close().map_err(|(_, e)| StorageError::Sqlite(e))?;
        tracing::debug!(path = %self.config.path.display(), "Dedup store closed");
        Ok(())
    }
}

impl DedupStorage for DedupStore {
    fn add(&self, entries: &[LeafDedupInfo]) -> StorageResult<()> {
        DedupStore::add(self, entries)
    }

    fn get(&self, leaf_id: &[u8]) -> StorageResult<Option<SctDedupInfo>> {
        DedupStore::get(self, leaf_id)
    }

    fn log_size(&self) -> StorageResult<u64> {
        DedupStore::log_size(self)
    }
}
