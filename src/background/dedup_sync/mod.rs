// File: src/background/dedup_sync/mod.rs

//! Dedup synchronizer job
//!
//! Backfills the dedup store from the integrated log, starting at the store's
//! contiguous size.

pub mod config;
pub mod job;
pub mod logic;


pub use config::DedupSyncConfig;
pub use job::DedupSync;
pub use logic::sync_once;
