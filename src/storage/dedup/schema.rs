// File: src/storage/dedup/schema.rs

//! Bucket layout and the open-time consistency check
//!
//! Each bucket is a key/value table holding raw codec bytes:
//! - `leafIdx`: `<leafID, idx ‖ timestamp>`
//! - `logSize`: a single `<"size", n>` entry

use rusqlite::{params, Connection, OptionalExtension};

use super::codec;
use crate::error::{StorageError, StorageResult};

/// Dedup bucket name
pub const DEDUP_BUCKET: &str = "leafIdx";

/// Size bucket name
pub const SIZE_BUCKET: &str = "logSize";

/// The only key of the size bucket
pub const SIZE_KEY: &[u8] = b"size";

const CREATE_BUCKETS_SQL: &str = r#"
CREATE TABLE "leafIdx" (
    key BLOB PRIMARY KEY NOT NULL,  -- leafID (certificate hash)
    value BLOB NOT NULL             -- 16 bytes: BE idx || BE timestamp
) WITHOUT ROWID;

CREATE TABLE "logSize" (
    key BLOB PRIMARY KEY NOT NULL,  -- always "size"
    value BLOB NOT NULL             -- 8 bytes: BE contiguous size
) WITHOUT ROWID;
"#;

/// Which buckets exist in an opened database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketState {
    /// Fresh database
    Absent,
    /// Both buckets exist
    Present,
    /// Exactly one bucket exists
    Inconsistent {
        present: &'static str,
        missing: &'static str,
    },
}

fn bucket_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![name],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map(|found| found.is_some())
}

/// Inspect bucket presence
pub fn inspect(conn: &Connection) -> StorageResult<BucketState> {
    let dedup = bucket_exists(conn, DEDUP_BUCKET)?;
    let size = bucket_exists(conn, SIZE_BUCKET)?;

    Ok(match (dedup, size) {
        (false, false) => BucketState::Absent,
        (true, true) => BucketState::Present,
        (true, false) => BucketState::Inconsistent {
            present: DEDUP_BUCKET,
            missing: SIZE_BUCKET,
        },
        (false, true) => BucketState::Inconsistent {
            present: SIZE_BUCKET,
            missing: DEDUP_BUCKET,
        },
    })
}

/// Create both buckets and set the size counter to 0
///
/// Must run inside the same transaction as `inspect`.
pub fn create_buckets(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(CREATE_BUCKETS_SQL)?;
    conn.execute(
        "INSERT INTO \"logSize\" (key, value) VALUES (?1, ?2)",
        params![SIZE_KEY, codec::encode_size(0).as_slice()],
    )?;
    Ok(())
}

/// Resolve bucket state into `Ok` (ready to use) or an initialization error
pub fn ensure_buckets(conn: &Connection) -> StorageResult<()> {
    match inspect(conn)? {
        BucketState::Absent => {
            tracing::debug!(
                dedup_bucket = DEDUP_BUCKET,
                size_bucket = SIZE_BUCKET,
                "No pre-existing buckets, creating them with size 0"
            );
            create_buckets(conn)
        }
        BucketState::Present => {
            tracing::debug!(
                dedup_bucket = DEDUP_BUCKET,
                size_bucket = SIZE_BUCKET,
                "Found pre-existing buckets"
            );
            Ok(())
        }
        BucketState::Inconsistent { present, missing } => {
            Err(StorageError::InconsistentState { present, missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(inspect(&conn).unwrap(), BucketState::Absent);
    }

    #[test]
    fn test_create_buckets_initializes_size() {
        let conn = Connection::open_in_memory().unwrap();
        create_buckets(&conn).unwrap();
        assert_eq!(inspect(&conn).unwrap(), BucketState::Present);

        let value: Vec<u8> = conn
            .query_row(
                "SELECT value FROM \"logSize\" WHERE key = ?1",
                params![SIZE_KEY],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(value, vec![0u8; 8]);
    }

    #[test]
    fn test_inspect_only_size_bucket() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE \"logSize\" (key BLOB PRIMARY KEY, value BLOB NOT NULL);")
            .unwrap();

        assert_eq!(
            inspect(&conn).unwrap(),
            BucketState::Inconsistent {
                present: SIZE_BUCKET,
                missing: DEDUP_BUCKET,
            }
        );
        assert!(matches!(
            ensure_buckets(&conn),
            Err(StorageError::InconsistentState { .. })
        ));
    }

    #[test]
    fn test_ensure_buckets_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_buckets(&conn).unwrap();
        ensure_buckets(&conn).unwrap();
        assert_eq!(inspect(&conn).unwrap(), BucketState::Present);
    }
}
