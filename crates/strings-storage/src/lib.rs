//! Storage layer for the string analyzer.
//!
//! Provides the `RecordStore` contract and two implementations:
//! - `Storage`: RocksDB-backed, with column families for records and
//!   insertion order, atomic write batches and snapshot enumeration
//! - `MemoryStore`: process-local, for tests and ephemeral runs

pub mod column_families;
pub mod db;
pub mod error;
pub mod keys;
pub mod memory;
pub mod store;

pub use db::{Storage, StorageStats};
pub use error::StorageError;
pub use keys::{RecordKey, SequenceKey};
pub use memory::MemoryStore;
pub use store::RecordStore;
