use kanban_core::KanbanResult;

/// Durable key/value storage for string blobs.
///
/// Keys are short identifiers such as `kanban-task-manager` or `theme`.
/// Implementations must be usable from any thread; calls are synchronous and
/// expected to be cheap enough to run after every mutation.
pub trait StateStorage: Send + Sync {
    /// Read the value stored under `key`, `None` when nothing is stored
    fn get(&self, key: &str) -> KanbanResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> KanbanResult<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> KanbanResult<()>;
}
