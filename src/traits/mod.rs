//! Trait definitions for dedup storage and the authoritative log

pub mod dedup;
pub mod log_reader;

pub use dedup::{DedupStorage, LeafDedupInfo, SctDedupInfo};
pub use log_reader::{LogLeaf, LogReader};
