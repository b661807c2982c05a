//! The persisted subset of the store and its versioned wrapper.
//!
//! Layout under [`STORAGE_KEY`]:
//! `{"state": {"data": ..., "sidebarVisible": ..., "theme": ..., "isLoggedIn": ...}, "version": 2}`.
//! Blobs carrying any other version are ignored, never migrated.

use crate::traits::StateStorage;
use kanban_core::KanbanResult;
use kanban_domain::{AppData, ThemeMode};
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "kanban-task-manager";
pub const SCHEMA_VERSION: u32 = 2;

/// Standalone key mirroring the current theme.
pub const THEME_KEY: &str = "theme";
/// Standalone key mirroring the login flag as `"true"`/`"false"`.
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub data: AppData,
    pub sidebar_visible: bool,
    pub theme: ThemeMode,
    pub is_logged_in: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            data: AppData::default(),
            sidebar_visible: true,
            theme: ThemeMode::default(),
            is_logged_in: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedEnvelope {
    pub state: PersistedState,
    pub version: u32,
}

/// Only the version is inspected before committing to the full shape.
#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

/// Read the persisted state.
///
/// Returns `Ok(None)` when nothing is stored or the stored blob has a
/// different schema version. Unreadable JSON is an error.
pub fn load_persisted(storage: &dyn StateStorage) -> KanbanResult<Option<PersistedState>> {
    let Some(raw) = storage.get(STORAGE_KEY)? else {
        tracing::debug!("No persisted state under {}", STORAGE_KEY);
        return Ok(None);
    };

    let probe: VersionProbe = serde_json::from_str(&raw)?;
    if probe.version != Some(SCHEMA_VERSION) {
        tracing::warn!(
            "Ignoring persisted state with version {:?}, expected {}",
            probe.version,
            SCHEMA_VERSION
        );
        return Ok(None);
    }

    let envelope: PersistedEnvelope = serde_json::from_str(&raw)?;
    tracing::info!(
        "Loaded persisted state ({} boards)",
        envelope.state.data.boards.len()
    );
    Ok(Some(envelope.state))
}

pub fn save_persisted(storage: &dyn StateStorage, state: &PersistedState) -> KanbanResult<()> {
    let envelope = PersistedEnvelope {
        state: state.clone(),
        version: SCHEMA_VERSION,
    };
    let json = serde_json::to_string(&envelope)?;
    storage.set(STORAGE_KEY, &json)?;
    tracing::debug!("Saved {} bytes under {}", json.len(), STORAGE_KEY);
    Ok(())
}

/// Theme stored under [`THEME_KEY`], if it holds a known value.
pub fn stored_theme(storage: &dyn StateStorage) -> KanbanResult<Option<ThemeMode>> {
    Ok(storage
        .get(THEME_KEY)?
        .and_then(|value| value.parse::<ThemeMode>().ok()))
}

pub fn stored_logged_in(storage: &dyn StateStorage) -> KanbanResult<bool> {
    Ok(storage.get(LOGGED_IN_KEY)?.as_deref() == Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use kanban_domain::Board;

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();
        let state = PersistedState {
            data: AppData::new(vec![Board::new("Sprint 1")]),
            sidebar_visible: false,
            theme: ThemeMode::Dark,
            is_logged_in: true,
        };

        save_persisted(&storage, &state).unwrap();
        assert_eq!(load_persisted(&storage).unwrap(), Some(state));
    }

    #[test]
    fn test_wire_layout() {
        let storage = MemoryStorage::new();
        save_persisted(&storage, &PersistedState::default()).unwrap();

        let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["state"]["sidebarVisible"], true);
        assert_eq!(value["state"]["theme"], "light");
        assert_eq!(value["state"]["isLoggedIn"], false);
        assert!(value["state"]["data"]["boards"].is_array());
    }

    #[test]
    fn test_version_mismatch_is_ignored() {
        let storage = MemoryStorage::new();
        storage
            .set(
                STORAGE_KEY,
                r#"{"state":{"data":{"boards":[]},"sidebarVisible":true,"theme":"dark","isLoggedIn":true},"version":1}"#,
            )
            .unwrap();
        assert_eq!(load_persisted(&storage).unwrap(), None);

        storage.set(STORAGE_KEY, r#"{"state":42}"#).unwrap();
        assert_eq!(load_persisted(&storage).unwrap(), None);
    }

    #[test]
    fn test_missing_and_corrupt() {
        let storage = MemoryStorage::new();
        assert_eq!(load_persisted(&storage).unwrap(), None);

        storage.set(STORAGE_KEY, "not json").unwrap();
        assert!(load_persisted(&storage).is_err());
    }

    #[test]
    fn test_side_keys() {
        let storage = MemoryStorage::new();
        assert_eq!(stored_theme(&storage).unwrap(), None);
        assert!(!stored_logged_in(&storage).unwrap());

        storage.set(THEME_KEY, "dark").unwrap();
        storage.set(LOGGED_IN_KEY, "true").unwrap();
        assert_eq!(stored_theme(&storage).unwrap(), Some(ThemeMode::Dark));
        assert!(stored_logged_in(&storage).unwrap());

        storage.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(stored_theme(&storage).unwrap(), None);
    }
}
