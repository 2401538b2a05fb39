//! Dataset caching
//!
//! Provides a single-entry in-memory cache with time-based expiration for
//! the upstream country dataset.

pub mod store;

pub use store::{CachedData, DatasetCache};
