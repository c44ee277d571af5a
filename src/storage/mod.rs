//! Storage module
//!
//! Provides the SQLite-backed SCT dedup store.

pub mod config;
pub mod dedup;

// Re-export main storage types
pub use config::{DedupStats, DedupStoreConfig, SyncMode};
pub use dedup::DedupStore;

// Re-export storage trait from traits module
pub use crate::traits::DedupStorage;
