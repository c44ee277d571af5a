// File: src/storage/dedup/log_size.rs

//! Contiguous-size tracker
//!
//! `size == N` means every index in `[0, N)` has been presented to `add`.

use rusqlite::{params, Connection, OptionalExtension};

use super::codec;
use super::schema::{SIZE_BUCKET, SIZE_KEY};
use crate::error::{StorageError, StorageResult};

/// Read the counter; a missing key is an integrity error
pub fn current_size(conn: &Connection) -> StorageResult<u64> {
    let raw = conn
        .prepare_cached("SELECT value FROM \"logSize\" WHERE key = ?1")?
        .query_row(params![SIZE_KEY], |row| row.get::<_, Vec<u8>>(0))
        .optional()?;

    match raw {
        Some(bytes) => Ok(codec::decode_size(&bytes)?),
        None => Err(StorageError::MissingLogSize(SIZE_BUCKET)),
    }
}

/// Advance the counter by one if `index` is exactly the frontier
///
/// Returns the counter value after the call. A counter at `u64::MAX` cannot
/// advance and is reported as an integrity error.
pub fn advance_if_contiguous(conn: &Connection, index: u64, size: u64) -> StorageResult<u64> {
    if index != size {
        return Ok(size);
    }

    let next = size
        .checked_add(1)
        .ok_or(StorageError::LogSizeOverflow(size))?;
    tracing::trace!(size = next, "Updating deduped size");
    conn.prepare_cached("UPDATE \"logSize\" SET value = ?1 WHERE key = ?2")?
        .execute(params![codec::encode_size(next).as_slice(), SIZE_KEY])?;
    Ok(next)
}
