// File: src/storage/dedup/leaf_idx.rs

//! Dedup bucket accessor: point reads and writes of `leafID -> (idx, timestamp)`
//!
//! `put` overwrites unconditionally; the keep-smallest rule is applied by
//! `DedupStore::add`.

use rusqlite::{params, Connection, OptionalExtension};

use super::codec;
use crate::error::StorageResult;
use crate::traits::SctDedupInfo;

/// Raw stored value for `leaf_id`, if any
pub fn get_raw(conn: &Connection, leaf_id: &[u8]) -> rusqlite::Result<Option<Vec<u8>>> {
    conn.prepare_cached("SELECT value FROM \"leafIdx\" WHERE key = ?1")?
        .query_row(params![leaf_id], |row| row.get::<_, Vec<u8>>(0))
        .optional()
}

/// Decoded record for `leaf_id`
///
/// Returns `Ok(None)` when absent and a decode error when the stored value is
/// not 16 bytes long.
pub fn get(conn: &Connection, leaf_id: &[u8]) -> StorageResult<Option<SctDedupInfo>> {
    match get_raw(conn, leaf_id)? {
        Some(bytes) => {
            let (idx, timestamp) = codec::decode_value(&bytes)?;
            Ok(Some(SctDedupInfo { idx, timestamp }))
        }
        None => Ok(None),
    }
}

/// Overwrite the record for `leaf_id`
pub fn put(conn: &Connection, leaf_id: &[u8], idx: u64, timestamp: u64) -> StorageResult<()> {
    let value = codec::encode_value(idx, timestamp);
    conn.prepare_cached("INSERT OR REPLACE INTO \"leafIdx\" (key, value) VALUES (?1, ?2)")?
        .execute(params![leaf_id, value.as_slice()])?;
    Ok(())
}

/// Number of records in the bucket
pub fn count(conn: &Connection) -> StorageResult<u64> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM \"leafIdx\"", [], |row| row.get(0))?;
    Ok(n as u64)
}
