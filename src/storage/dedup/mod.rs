// File: src/storage/dedup/mod.rs

//! SQLite dedup store
//!
//! Keeps, for each certificate hash, the smallest log index and timestamp
//! ever assigned to it, plus a watermark of contiguously recorded indices.

pub mod codec;
mod leaf_idx;
mod log_size;
pub mod schema;
mod store;


pub use schema::{DEDUP_BUCKET, SIZE_BUCKET};
pub use store::DedupStore;
