//! Persistence: key-value backends, snapshots and backups

pub mod backend;
pub mod backup;
pub mod snapshot;

pub use backend::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use backup::ImportError;
pub use snapshot::{load, save, seed_tools, LoadOutcome};
