//! Durable storage for the action queue.
//!
//! The queue writes its full action list wholesale on every mutation — the
//! persisted form is one JSON array, so the store is an exact mirror of
//! memory after each completed operation. Stores are injected into the
//! queue, never reached through a process-wide key, so tests and
//! storage-less hosts can substitute their own.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::model::OfflineAction;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// A store holding the queue's full action list.
///
/// `save` replaces the stored list wholesale; there are no delta writes.
/// A store that has never been written to must `load` as empty, and a
/// store whose contents cannot be decoded must report it rather than
/// pretend to be empty.
pub trait ActionStore {
    fn load(&self) -> Result<Vec<OfflineAction>>;

    fn save(&self, actions: &[OfflineAction]) -> Result<()>;
}
