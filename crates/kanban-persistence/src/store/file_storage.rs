use crate::store::atomic_writer::AtomicWriter;
use crate::traits::StateStorage;
use kanban_core::{KanbanError, KanbanResult};
use std::path::{Path, PathBuf};

/// Directory-backed storage: one file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> KanbanResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(KanbanError::Validation(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl StateStorage for FileStorage {
    fn get(&self, key: &str) -> KanbanResult<Option<String>> {
        AtomicWriter::read_optional(&self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> KanbanResult<()> {
        AtomicWriter::write_atomic(&self.path_for(key)?, value.as_bytes())
    }

    fn remove(&self, key: &str) -> KanbanResult<()> {
        match std::fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
