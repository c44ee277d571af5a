//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure including:
//! - On-disk stores in temporary directories
//! - Leaf builders for test data
//! - An in-memory log reader

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::*;

pub use std::sync::Arc;
