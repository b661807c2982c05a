use std::path::{Path, PathBuf};
use std::sync::Arc;

use kanban_core::AppConfig;
use kanban_domain::index::clamp_index;
use kanban_domain::TaskId;
use kanban_persistence::FileStorage;
use kanban_store::KanbanStore;

/// A loaded store for one CLI invocation.
///
/// Autosave is off; handlers call [`CliContext::save`] after a successful
/// mutation so storage failures become CLI errors.
pub struct CliContext {
    pub store: KanbanStore,
}

impl CliContext {
    pub fn open(storage_dir: Option<PathBuf>, config_path: Option<&Path>) -> Self {
        let config = match config_path {
            Some(path) => {
                let mut config = AppConfig::load_from(path);
                config.apply_env_overrides(|name| std::env::var(name).ok());
                config
            }
            None => AppConfig::load(),
        };

        let mut builder = KanbanStore::builder().config(&config).autosave(false);
        match storage_dir.or_else(|| config.effective_storage_dir()) {
            Some(dir) => {
                tracing::debug!("Using storage directory {}", dir.display());
                builder = builder.storage(Arc::new(FileStorage::new(dir)));
            }
            None => tracing::warn!("No storage directory available, state will not persist"),
        }

        let store = builder.build();
        store.load();
        Self { store }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.store.save()?;
        Ok(())
    }

    /// Id of the task that clamped `(column, task)` indices resolve to on `board`.
    pub fn resolve_task_id(&self, board: usize, column: usize, task: usize) -> Option<TaskId> {
        let board = self.store.board(board)?;
        let column = board.columns.get(board.clamped_column_index(column)?)?;
        let task = clamp_index(task, column.tasks.len())?;
        Some(column.tasks[task].id)
    }
}
