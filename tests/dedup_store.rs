//! Integration tests for the on-disk dedup store

mod common;

use common::*;
use ct_dedup::cert::{add_cert_dedup_info, get_cert_dedup_info, leaf_id_for_cert};
use ct_dedup::storage::dedup::{DEDUP_BUCKET, SIZE_BUCKET};
use ct_dedup::{DedupStorage, DedupStore, LeafDedupInfo, SctDedupInfo, StorageError};

#[test]
fn test_state_survives_reopen() {
    let (dir, store) = temp_store();

    store.add(&[entry(0), entry(1), entry(2)]).unwrap();
    store
        .add(&[LeafDedupInfo::new(leaf_id(0), 9, 42)])
        .unwrap();
    store.close().unwrap();

    let store = DedupStore::open(db_path(&dir)).unwrap();
    assert_eq!(store.log_size().unwrap(), 3);
    assert_eq!(
        store.get(&leaf_id(0)).unwrap(),
        Some(SctDedupInfo {
            idx: 0,
            timestamp: 1_700_000_000_000
        })
    );
    assert_eq!(store.get(&leaf_id(3)).unwrap(), None);

    store.add(&[entry(3)]).unwrap();
    assert_eq!(store.log_size().unwrap(), 4);
}

#[test]
fn test_second_open_fails_while_held() {
    let dir = tempfile::tempdir().unwrap();
    let first = DedupStore::open(db_path(&dir)).unwrap();
    first.add(&[entry(0)]).unwrap();

    match DedupStore::with_config(impatient_config(&dir)) {
        Err(e @ StorageError::ConnectionFailed(_)) => assert!(!e.is_recoverable()),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("second open succeeded while the file was held"),
    }

    // The holder keeps working
    first.add(&[entry(1)]).unwrap();
    assert_eq!(first.log_size().unwrap(), 2);
    drop(first);

    let second = DedupStore::with_config(impatient_config(&dir)).unwrap();
    assert_eq!(second.log_size().unwrap(), 2);
}

#[test]
fn test_open_rejects_half_initialized_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_path(&dir);

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(&format!(
            "CREATE TABLE \"{SIZE_BUCKET}\" (key BLOB PRIMARY KEY NOT NULL, value BLOB NOT NULL) WITHOUT ROWID;"
        ))
        .unwrap();
    }

    match DedupStore::open(&path) {
        Err(StorageError::InconsistentState { present, missing }) => {
            assert_eq!(present, SIZE_BUCKET);
            assert_eq!(missing, DEDUP_BUCKET);
        }
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("half-initialized file was accepted"),
    }

    // Still rejected: opening must not repair the file
    assert!(DedupStore::open(&path).is_err());
}

#[test]
fn test_stats_on_disk() {
    let (_dir, store) = temp_store();
    store.add(&[entry(0), entry(1), entry(5)]).unwrap();

    let stats = store.stats().unwrap();
    assert_eq!(stats.leaf_count, 3);
    assert_eq!(stats.log_size, 2);
    assert!(stats.file_size > 0);
}

#[test]
fn test_cert_dedup_through_trait_object() {
    let (_dir, store) = temp_store();
    let storage: Arc<dyn DedupStorage> = Arc::new(store);
    let cert = b"0\x82\x01\x0a certificate bytes";

    add_cert_dedup_info(storage.as_ref(), cert, SctDedupInfo { idx: 4, timestamp: 400 }).unwrap();
    add_cert_dedup_info(storage.as_ref(), cert, SctDedupInfo { idx: 2, timestamp: 200 }).unwrap();
    add_cert_dedup_info(storage.as_ref(), cert, SctDedupInfo { idx: 3, timestamp: 300 }).unwrap();

    assert_eq!(
        get_cert_dedup_info(storage.as_ref(), cert).unwrap(),
        Some(SctDedupInfo { idx: 2, timestamp: 200 })
    );
    assert_eq!(
        storage.get(&leaf_id_for_cert(cert)).unwrap(),
        Some(SctDedupInfo { idx: 2, timestamp: 200 })
    );
    assert_eq!(get_cert_dedup_info(storage.as_ref(), b"other").unwrap(), None);
    assert_eq!(storage.log_size().unwrap(), 0);
}

#[test]
fn test_concurrent_writers_on_disk() {
    let (_dir, store) = temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in (t..40).step_by(4) {
                    store.add(&[entry(i)]).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Out-of-order arrivals can leave the counter short of 40, but never
    // past a missing index
    let size = store.log_size().unwrap();
    assert!(size <= 40);
    for i in 0..40 {
        assert_eq!(store.get(&leaf_id(i)).unwrap().map(|info| info.idx), Some(i));
    }
    assert_eq!(store.stats().unwrap().leaf_count, 40);
}
