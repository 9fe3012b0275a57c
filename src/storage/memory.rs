//! In-memory action store, for tests and storage-less hosts.

use std::sync::Mutex;

use crate::model::OfflineAction;

use super::{ActionStore, Result};

/// Holds the action list in memory. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    actions: Mutex<Vec<OfflineAction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActionStore for MemoryStore {
    fn load(&self) -> Result<Vec<OfflineAction>> {
        Ok(self.actions.lock().expect("memory store lock poisoned").clone())
    }

    fn save(&self, actions: &[OfflineAction]) -> Result<()> {
        *self.actions.lock().expect("memory store lock poisoned") = actions.to_vec();
        Ok(())
    }
}
