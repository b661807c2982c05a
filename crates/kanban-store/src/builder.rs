use std::sync::Arc;

use kanban_core::AppConfig;
use kanban_domain::{AppData, ThemeMode};
use kanban_persistence::{stored_logged_in, stored_theme, StateStorage};
use kanban_remote::{source_from_config, BoardSource};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::action_log::ActionLog;
use crate::remote::RemoteStatus;
use crate::store::{KanbanStore, StoreInner, StoreState};

/// Called with the active theme after rehydration and on every toggle.
pub type ThemeHook = Arc<dyn Fn(ThemeMode) + Send + Sync>;

/// Assembles a [`KanbanStore`] from its collaborators.
///
/// Nothing is read from storage beyond the standalone theme and login keys
/// until [`KanbanStore::load`] is called.
pub struct KanbanStoreBuilder {
    source: Option<Arc<dyn BoardSource>>,
    storage: Option<Arc<dyn StateStorage>>,
    theme_hook: Option<ThemeHook>,
    initial_data: Option<AppData>,
    prefers_dark: bool,
    autosave: bool,
}

impl Default for KanbanStoreBuilder {
    fn default() -> Self {
        Self {
            source: None,
            storage: None,
            theme_hook: None,
            initial_data: None,
            prefers_dark: false,
            autosave: true,
        }
    }
}

impl KanbanStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the remote source, theme preference and autosave flag from `config`.
    pub fn config(mut self, config: &AppConfig) -> Self {
        self.source = Some(source_from_config(&config.remote));
        self.prefers_dark = config.prefers_dark;
        self.autosave = config.autosave;
        self
    }

    pub fn source(mut self, source: Arc<dyn BoardSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn StateStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn theme_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(ThemeMode) + Send + Sync + 'static,
    {
        self.theme_hook = Some(Arc::new(hook));
        self
    }

    /// Data used until something is rehydrated or fetched. Defaults to the bundled boards.
    pub fn initial_data(mut self, data: AppData) -> Self {
        self.initial_data = Some(data);
        self
    }

    pub fn prefers_dark(mut self, prefers_dark: bool) -> Self {
        self.prefers_dark = prefers_dark;
        self
    }

    pub fn autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn build(self) -> KanbanStore {
        let fallback_theme = if self.prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };

        let (theme, is_logged_in) = match &self.storage {
            Some(storage) => {
                let theme = stored_theme(storage.as_ref()).unwrap_or_else(|e| {
                    tracing::warn!("Failed to read stored theme: {}", e);
                    None
                });
                let logged_in = stored_logged_in(storage.as_ref()).unwrap_or_else(|e| {
                    tracing::warn!("Failed to read stored login flag: {}", e);
                    false
                });
                (theme.unwrap_or(fallback_theme), logged_in)
            }
            None => (fallback_theme, false),
        };

        let state = StoreState {
            data: Arc::new(self.initial_data.unwrap_or_else(AppData::bundled)),
            version: 0,
            sidebar_visible: true,
            theme,
            is_logged_in,
            remote: RemoteStatus::default(),
            log: ActionLog::default(),
        };
        let (version_tx, _) = watch::channel(0);

        KanbanStore {
            inner: Arc::new(StoreInner {
                state: Mutex::new(state),
                version_tx,
                in_flight: Mutex::new(None),
                source: self.source,
                storage: self.storage,
                theme_hook: self.theme_hook,
                autosave: self.autosave,
            }),
        }
    }
}
