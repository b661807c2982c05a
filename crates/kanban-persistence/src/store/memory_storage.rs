use crate::traits::StateStorage;
use kanban_core::KanbanResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-process storage, used when no data directory is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl StateStorage for MemoryStorage {
    fn get(&self, key: &str) -> KanbanResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KanbanResult<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> KanbanResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
