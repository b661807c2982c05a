//! The board store.
//!
//! All state lives behind one mutex and every mutation runs to completion
//! under it. Board data is held as `Arc<AppData>`: readers get cheap
//! snapshots that later mutations never touch, and writers go through
//! `Arc::make_mut`. Each change bumps the version stamp, records a named
//! action, autosaves, and notifies `subscribe()` receivers.

use std::sync::Arc;

use kanban_core::{KanbanResult, LogEntry, Loggable};
use kanban_domain::commands::{
    AddBoard, AddColumn, AddTask, DeleteBoard, DeleteColumn, DeleteTask, EditBoard, ToggleSubtask,
    UpdateTask,
};
use kanban_domain::{
    apply_move, resolve_drop, status_change, AppData, Board, Command, CommandContext, MoveTask,
    Task, TaskId, TaskLocation, TaskPatch, ThemeMode,
};
use kanban_persistence::{
    load_persisted, save_persisted, PersistedState, StateStorage, LOGGED_IN_KEY, THEME_KEY,
};
use kanban_remote::BoardSource;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::action_log::ActionLog;
use crate::builder::{KanbanStoreBuilder, ThemeHook};
use crate::remote::{InFlightFetch, RemoteStatus};

pub(crate) struct StoreState {
    pub(crate) data: Arc<AppData>,
    pub(crate) version: u64,
    pub(crate) sidebar_visible: bool,
    pub(crate) theme: ThemeMode,
    pub(crate) is_logged_in: bool,
    pub(crate) remote: RemoteStatus,
    pub(crate) log: ActionLog,
}

impl StoreState {
    fn persisted(&self) -> PersistedState {
        PersistedState {
            data: (*self.data).clone(),
            sidebar_visible: self.sidebar_visible,
            theme: self.theme,
            is_logged_in: self.is_logged_in,
        }
    }
}

pub(crate) struct StoreInner {
    pub(crate) state: Mutex<StoreState>,
    pub(crate) version_tx: watch::Sender<u64>,
    /// Lock order: `in_flight` before `state`.
    pub(crate) in_flight: Mutex<Option<InFlightFetch>>,
    pub(crate) source: Option<Arc<dyn BoardSource>>,
    pub(crate) storage: Option<Arc<dyn StateStorage>>,
    pub(crate) theme_hook: Option<ThemeHook>,
    pub(crate) autosave: bool,
}

/// Cheaply clonable handle to one shared board store.
#[derive(Clone)]
pub struct KanbanStore {
    pub(crate) inner: Arc<StoreInner>,
}

impl KanbanStore {
    pub fn builder() -> KanbanStoreBuilder {
        KanbanStoreBuilder::new()
    }

    /// Run `f` under the state lock. When it returns `Some`, the change is
    /// committed: version bump, action log entry, autosave, notification.
    pub(crate) fn commit<R>(
        &self,
        action: &str,
        f: impl FnOnce(&mut StoreState) -> Option<R>,
    ) -> Option<R> {
        let mut state = self.inner.state.lock();
        let result = f(&mut state)?;

        state.version += 1;
        let version = state.version;
        state.log.record(version, action);
        if self.inner.autosave {
            self.persist(&state);
        }
        drop(state);

        self.inner.version_tx.send_replace(version);
        Some(result)
    }

    fn dispatch(&self, command: &dyn Command) -> bool {
        tracing::debug!("Executing: {}", command.description());
        self.commit(command.action(), |state| {
            let data = Arc::make_mut(&mut state.data);
            let mut context = CommandContext {
                boards: &mut data.boards,
            };
            command.execute(&mut context).changed().then_some(())
        })
        .is_some()
    }

    fn persist(&self, state: &StoreState) {
        let Some(storage) = &self.inner.storage else {
            return;
        };
        if let Err(e) = save_persisted(storage.as_ref(), &state.persisted()) {
            tracing::warn!("Failed to save state, continuing in memory: {}", e);
        }
    }

    fn write_key(&self, key: &str, value: &str) {
        if let Some(storage) = &self.inner.storage {
            if let Err(e) = storage.set(key, value) {
                tracing::warn!("Failed to write {}: {}", key, e);
            }
        }
    }

    fn apply_theme(&self, theme: ThemeMode) {
        if let Some(hook) = &self.inner.theme_hook {
            hook(theme);
        }
        self.write_key(THEME_KEY, theme.as_str());
    }

    fn sync_login_flag(&self, is_logged_in: bool) {
        self.write_key(LOGGED_IN_KEY, if is_logged_in { "true" } else { "false" });
    }

    // Lifecycle

    /// Rehydrate from storage, then apply the theme and login side effects once.
    ///
    /// Returns whether persisted state was found. A missing, mismatched or
    /// unreadable blob leaves the current (default) state in place.
    pub fn load(&self) -> bool {
        let persisted = match &self.inner.storage {
            Some(storage) => load_persisted(storage.as_ref()).unwrap_or_else(|e| {
                tracing::warn!("Failed to read persisted state, using defaults: {}", e);
                None
            }),
            None => None,
        };

        let rehydrated = match persisted {
            Some(persisted) => {
                let mut state = self.inner.state.lock();
                state.data = Arc::new(persisted.data);
                state.sidebar_visible = persisted.sidebar_visible;
                state.theme = persisted.theme;
                state.is_logged_in = persisted.is_logged_in;
                state.version += 1;
                let version = state.version;
                state.log.record(version, "persist/rehydrate");
                drop(state);
                self.inner.version_tx.send_replace(version);
                true
            }
            None => false,
        };

        let (theme, is_logged_in) = {
            let state = self.inner.state.lock();
            (state.theme, state.is_logged_in)
        };
        self.apply_theme(theme);
        self.sync_login_flag(is_logged_in);

        tracing::info!(
            "Store loaded ({}), {} boards",
            if rehydrated { "rehydrated" } else { "defaults" },
            self.boards_len()
        );
        rehydrated
    }

    /// Write the persisted subset now. Without storage this does nothing.
    pub fn save(&self) -> KanbanResult<()> {
        let Some(storage) = &self.inner.storage else {
            return Ok(());
        };
        let persisted = self.inner.state.lock().persisted();
        save_persisted(storage.as_ref(), &persisted)?;
        tracing::info!("Saved {} boards", persisted.data.boards.len());
        Ok(())
    }

    // Board mutations

    pub fn add_board(&self, name: impl Into<String>) -> bool {
        self.dispatch(&AddBoard { name: name.into() })
    }

    pub fn delete_board(&self, board_index: usize) -> bool {
        self.dispatch(&DeleteBoard { board_index })
    }

    pub fn edit_board(
        &self,
        board_index: usize,
        name: impl Into<String>,
        column_names: Vec<String>,
    ) -> bool {
        self.dispatch(&EditBoard {
            board_index,
            name: name.into(),
            column_names,
        })
    }

    pub fn add_column(&self, board_index: usize, name: impl Into<String>) -> bool {
        self.dispatch(&AddColumn {
            board_index,
            name: name.into(),
        })
    }

    pub fn delete_column(&self, board_index: usize, column_index: usize) -> bool {
        self.dispatch(&DeleteColumn {
            board_index,
            column_index,
        })
    }

    pub fn add_task(&self, board_index: usize, column_index: usize, task: Task) -> bool {
        self.dispatch(&AddTask {
            board_index,
            column_index,
            task,
        })
    }

    pub fn update_task(
        &self,
        board_index: usize,
        column_index: usize,
        task_index: usize,
        patch: TaskPatch,
    ) -> bool {
        self.dispatch(&UpdateTask {
            board_index,
            column_index,
            task_index,
            patch,
        })
    }

    pub fn delete_task(&self, board_index: usize, column_index: usize, task_index: usize) -> bool {
        self.dispatch(&DeleteTask {
            board_index,
            column_index,
            task_index,
        })
    }

    pub fn toggle_subtask(
        &self,
        board_index: usize,
        column_index: usize,
        task_index: usize,
        subtask_index: usize,
    ) -> bool {
        self.dispatch(&ToggleSubtask {
            board_index,
            column_index,
            task_index,
            subtask_index,
        })
    }

    /// Relocate a task. Returns where it ended up, `None` for a no-op.
    pub fn move_task(&self, request: MoveTask) -> Option<TaskLocation> {
        tracing::debug!("Executing: {}", request.description());
        self.commit(request.action(), |state| {
            apply_move(&mut Arc::make_mut(&mut state.data).boards, &request)
        })
    }

    /// Move a task to the end of the first column named `status`.
    ///
    /// Returns the new `(column_index, task_index)`.
    pub fn change_task_status(
        &self,
        board_index: usize,
        column_index: usize,
        task_index: usize,
        status: &str,
    ) -> Option<(usize, usize)> {
        self.commit("kanban/moveTask", |state| {
            let board = state.data.board(board_index)?;
            let request = status_change(board, board_index, column_index, task_index, status)?;
            tracing::debug!("Executing: {}", request.description());
            apply_move(&mut Arc::make_mut(&mut state.data).boards, &request)
        })
        .map(|location| (location.column_index, location.task_index))
    }

    /// Apply a finished drag gesture given as raw drag ids.
    pub fn drop_task(&self, board_index: usize, active: &str, over: &str) -> Option<MoveTask> {
        let request = resolve_drop(board_index, active, over)?;
        self.move_task(request).map(|_| request)
    }

    pub fn set_data(&self, data: AppData) -> bool {
        self.commit("kanban/setData", |state| {
            if *state.data == data {
                return None;
            }
            state.data = Arc::new(data);
            Some(())
        })
        .is_some()
    }

    /// Replace the data with `updater(previous)` atomically.
    ///
    /// The updater runs under the store lock and must not call back into the store.
    pub fn update_data<F>(&self, updater: F) -> bool
    where
        F: FnOnce(&AppData) -> AppData,
    {
        self.commit("kanban/setData", |state| {
            let next = updater(&state.data);
            if *state.data == next {
                return None;
            }
            state.data = Arc::new(next);
            Some(())
        })
        .is_some()
    }

    // UI flags

    pub fn set_sidebar_visible(&self, visible: bool) -> bool {
        self.commit("ui/setSidebarVisible", |state| {
            if state.sidebar_visible == visible {
                return None;
            }
            state.sidebar_visible = visible;
            Some(())
        })
        .is_some()
    }

    pub fn toggle_sidebar(&self) -> bool {
        self.commit("ui/toggleSidebar", |state| {
            state.sidebar_visible = !state.sidebar_visible;
            Some(state.sidebar_visible)
        })
        .unwrap_or_else(|| self.sidebar_visible())
    }

    /// Flip the theme and re-apply it. Returns the new theme.
    pub fn toggle_theme(&self) -> ThemeMode {
        let theme = self
            .commit("ui/toggleTheme", |state| {
                state.theme = state.theme.toggled();
                Some(state.theme)
            })
            .unwrap_or_else(|| self.theme());
        self.apply_theme(theme);
        theme
    }

    pub fn login(&self) -> bool {
        self.set_logged_in(true, "auth/login")
    }

    pub fn logout(&self) -> bool {
        self.set_logged_in(false, "auth/logout")
    }

    fn set_logged_in(&self, is_logged_in: bool, action: &str) -> bool {
        let changed = self
            .commit(action, |state| {
                if state.is_logged_in == is_logged_in {
                    return None;
                }
                state.is_logged_in = is_logged_in;
                Some(())
            })
            .is_some();
        self.sync_login_flag(is_logged_in);
        changed
    }

    // Getters

    /// Snapshot of the current data. Later mutations never affect it.
    pub fn data(&self) -> Arc<AppData> {
        Arc::clone(&self.inner.state.lock().data)
    }

    pub fn boards_len(&self) -> usize {
        self.inner.state.lock().data.boards.len()
    }

    pub fn board(&self, board_index: usize) -> Option<Board> {
        self.inner.state.lock().data.board(board_index).cloned()
    }

    pub fn task(&self, board_index: usize, column_index: usize, task_index: usize) -> Option<Task> {
        self.inner
            .state
            .lock()
            .data
            .task(board_index, column_index, task_index)
            .cloned()
    }

    /// Column names of a board, empty when the board does not exist.
    pub fn column_names(&self, board_index: usize) -> Vec<String> {
        self.inner
            .state
            .lock()
            .data
            .board(board_index)
            .map(Board::column_names)
            .unwrap_or_default()
    }

    pub fn locate_task(&self, id: TaskId) -> Option<TaskLocation> {
        self.inner.state.lock().data.locate_task(id)
    }

    pub fn version(&self) -> u64 {
        self.inner.state.lock().version
    }

    /// Receiver that observes the version stamp after every change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.version_tx.subscribe()
    }

    pub fn remote_status(&self) -> RemoteStatus {
        self.inner.state.lock().remote.clone()
    }

    pub fn sidebar_visible(&self) -> bool {
        self.inner.state.lock().sidebar_visible
    }

    pub fn theme(&self) -> ThemeMode {
        self.inner.state.lock().theme
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.state.lock().is_logged_in
    }

    /// Recent named actions, oldest first.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.inner.state.lock().log.entries().to_vec()
    }

    /// Actions committed after `version`, for subscribers catching up on a watch notification.
    pub fn logs_since(&self, version: u64) -> Vec<LogEntry> {
        self.inner.state.lock().log.since(version).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{Column, Subtask};

    fn empty_store() -> KanbanStore {
        KanbanStore::builder()
            .initial_data(AppData::default())
            .build()
    }

    fn bundled_store() -> KanbanStore {
        KanbanStore::builder().build()
    }

    fn sample_store() -> KanbanStore {
        let board = Board::with_columns(
            "Main",
            vec![
                Column::with_tasks(
                    "Todo",
                    vec![Task::new("Old", "Todo")
                        .with_description("d")
                        .with_subtasks(vec![Subtask::new("s")])],
                ),
                Column::new("Done"),
            ],
        );
        KanbanStore::builder()
            .initial_data(AppData::new(vec![board]))
            .build()
    }

    #[test]
    fn test_add_board_to_empty_store() {
        let store = empty_store();
        assert!(store.add_board("Sprint 1"));

        let data = store.data();
        assert_eq!(data.boards.len(), 1);
        assert_eq!(data.boards[0].name, "Sprint 1");
        assert!(data.boards[0].columns.is_empty());
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_invalid_board_index_is_noop() {
        let store = sample_store();
        let before = store.data();

        assert!(!store.delete_board(1));
        assert!(!store.add_column(1, "X"));
        assert!(!store.add_task(1, 0, Task::new("t", "Todo")));
        assert!(!store.update_task(1, 0, 0, TaskPatch::title("x")));
        assert!(!store.delete_task(1, 0, 0));

        assert_eq!(*store.data(), *before);
        assert_eq!(store.version(), 0);
        assert!(store.logs().is_empty());
    }

    #[test]
    fn test_update_task_preserves_other_fields() {
        let store = sample_store();
        assert!(store.update_task(0, 0, 0, TaskPatch::title("New")));

        let task = store.task(0, 0, 0).unwrap();
        assert_eq!(task.title, "New");
        assert_eq!(task.description, "d");
        assert_eq!(task.status, "Todo");
        assert_eq!(task.subtasks, vec![Subtask::new("s")]);
    }

    #[test]
    fn test_move_todo_to_done() {
        let store = bundled_store();
        let title = store.task(0, 0, 0).unwrap().title;
        let todo_len = store.board(0).unwrap().columns[0].tasks.len();
        let done_len = store.board(0).unwrap().columns[2].tasks.len();

        let location = store
            .move_task(MoveTask {
                board_index: 0,
                from_column_index: 0,
                task_index: 0,
                to_column_index: 2,
                to_task_index: None,
            })
            .unwrap();

        let board = store.board(0).unwrap();
        assert_eq!(board.columns[0].tasks.len(), todo_len - 1);
        assert_eq!(board.columns[2].tasks.len(), done_len + 1);
        assert_eq!(location.task_index, done_len);
        let moved = &board.columns[2].tasks[done_len];
        assert_eq!(moved.title, title);
        assert_eq!(moved.status, "Done");
    }

    #[test]
    fn test_move_is_pure_relocation() {
        let store = bundled_store();
        let before = store.board(0).unwrap();
        let other_board = store.board(1).unwrap();
        let mut ids: Vec<_> = before.tasks().map(|t| t.id).collect();

        store.move_task(MoveTask {
            board_index: 0,
            from_column_index: 1,
            task_index: 1,
            to_column_index: 0,
            to_task_index: Some(1),
        });

        let after = store.board(0).unwrap();
        let mut after_ids: Vec<_> = after.tasks().map(|t| t.id).collect();
        ids.sort();
        after_ids.sort();
        assert_eq!(ids, after_ids);
        for column in &after.columns {
            assert!(column.tasks.iter().all(|t| t.status == column.name));
        }
        assert_eq!(store.board(1).unwrap(), other_board);
    }

    #[test]
    fn test_snapshots_are_not_affected_by_mutations() {
        let store = sample_store();
        let snapshot = store.data();

        store.add_board("Another");
        store.update_task(0, 0, 0, TaskPatch::title("Changed"));

        assert_eq!(snapshot.boards.len(), 1);
        assert_eq!(snapshot.boards[0].columns[0].tasks[0].title, "Old");
        assert_eq!(store.boards_len(), 2);
    }

    #[test]
    fn test_version_and_subscribe() {
        let store = sample_store();
        let mut receiver = store.subscribe();

        store.add_column(0, "Review");
        assert_eq!(store.version(), 1);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), 1);

        store.delete_column(0, 9);
        assert!(!receiver.has_changed().unwrap());
    }

    #[test]
    fn test_action_log_names() {
        let store = sample_store();
        store.add_board("B");
        store.toggle_subtask(0, 0, 0, 0);
        store.toggle_sidebar();

        let actions: Vec<_> = store.logs().into_iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec!["kanban/addBoard", "kanban/toggleSubtask", "ui/toggleSidebar"]
        );

        let since: Vec<_> = store.logs_since(1).into_iter().map(|e| e.version).collect();
        assert_eq!(since, vec![2, 3]);
    }

    #[test]
    fn test_toggle_subtask() {
        let store = sample_store();
        assert!(store.toggle_subtask(0, 0, 0, 0));
        assert!(store.task(0, 0, 0).unwrap().subtasks[0].is_completed);
        assert!(store.toggle_subtask(0, 0, 0, 0));
        assert!(!store.task(0, 0, 0).unwrap().subtasks[0].is_completed);
        assert!(!store.toggle_subtask(0, 0, 0, 1));
    }

    #[test]
    fn test_change_task_status() {
        let store = sample_store();
        assert_eq!(store.change_task_status(0, 0, 0, "Done"), Some((1, 0)));
        assert_eq!(store.task(0, 1, 0).unwrap().status, "Done");

        assert_eq!(store.change_task_status(0, 1, 0, "Done"), None);
        assert_eq!(store.change_task_status(0, 1, 0, "Blocked"), None);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_drop_task_on_column() {
        let store = bundled_store();
        let request = store.drop_task(0, "task-0-0", "column-1").unwrap();
        assert_eq!(request.to_column_index, 1);
        assert_eq!(request.to_task_index, None);
        assert_eq!(store.board(0).unwrap().columns[1].tasks.last().unwrap().status, "Doing");

        assert!(store.drop_task(0, "task-0-0", "task-0-0").is_none());
        assert!(store.drop_task(0, "column-0", "column-1").is_none());
        assert!(store.drop_task(7, "task-0-0", "column-1").is_none());
    }

    #[test]
    fn test_drop_task_reorders_within_column() {
        let store = bundled_store();
        let titles = |store: &KanbanStore| -> Vec<String> {
            store.board(0).unwrap().columns[0]
                .tasks
                .iter()
                .map(|t| t.title.clone())
                .collect()
        };
        let before = titles(&store);

        store.drop_task(0, "task-0-0", "task-0-2").unwrap();

        let after = titles(&store);
        assert_eq!(after[2], before[0]);
        assert_eq!(after[0], before[1]);
        assert_eq!(after[1], before[2]);
    }

    #[test]
    fn test_edit_board() {
        let store = sample_store();
        assert!(store.edit_board(
            0,
            "Renamed",
            vec!["Backlog".to_string(), "Done".to_string(), "Archive".to_string()]
        ));
        assert_eq!(store.column_names(0), vec!["Backlog", "Done", "Archive"]);
        assert_eq!(store.task(0, 0, 0).unwrap().status, "Backlog");

        assert!(!store.edit_board(0, " ", vec![]));
        assert!(store.column_names(5).is_empty());
    }

    #[test]
    fn test_set_and_update_data() {
        let store = sample_store();
        let data = store.data();

        assert!(!store.set_data((*data).clone()));
        assert_eq!(store.version(), 0);

        assert!(store.update_data(|previous| {
            let mut next = previous.clone();
            next.boards.push(Board::new("Added"));
            next
        }));
        assert_eq!(store.boards_len(), 2);

        assert!(store.set_data(AppData::default()));
        assert_eq!(store.boards_len(), 0);
    }

    #[test]
    fn test_ui_flags() {
        let store = empty_store();
        assert!(store.sidebar_visible());
        assert!(!store.set_sidebar_visible(true));
        assert!(store.set_sidebar_visible(false));
        assert!(store.toggle_sidebar());

        assert_eq!(store.theme(), ThemeMode::Light);
        assert_eq!(store.toggle_theme(), ThemeMode::Dark);

        assert!(!store.is_logged_in());
        assert!(store.login());
        assert!(!store.login());
        assert!(store.is_logged_in());
        assert!(store.logout());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_locate_task_survives_earlier_deletes() {
        let store = bundled_store();
        let id = store.task(0, 0, 2).unwrap().id;

        store.delete_task(0, 0, 0);

        let location = store.locate_task(id).unwrap();
        assert_eq!(location.column_index, 0);
        assert_eq!(location.task_index, 1);
    }

    #[test]
    fn test_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KanbanStore>();
    }
}
