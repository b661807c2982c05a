use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which remote board source `fetch` talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteSourceKind {
    /// Generic endpoint returning boards (or `{ "boards": [...] }`).
    Api,
    /// Users and todos from jsonplaceholder, grouped into boards.
    #[default]
    JsonPlaceholder,
    /// Trello boards by id.
    Trello,
}

impl RemoteSourceKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "api" => Some(Self::Api),
            "json_placeholder" | "jsonplaceholder" => Some(Self::JsonPlaceholder),
            "trello" => Some(Self::Trello),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrelloConfig {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub board_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub source: RemoteSourceKind,
    #[serde(default)]
    pub boards_url: Option<String>,
    #[serde(default)]
    pub api_delay_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub trello: TrelloConfig,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_autosave() -> bool {
    true
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            source: RemoteSourceKind::default(),
            boards_url: None,
            api_delay_ms: 0,
            timeout_secs: default_timeout_secs(),
            trello: TrelloConfig::default(),
        }
    }
}

impl RemoteConfig {
    /// Artificial delay applied after each remote response, if any.
    pub fn api_delay(&self) -> Option<Duration> {
        (self.api_delay_ms > 0).then(|| Duration::from_millis(self.api_delay_ms))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    #[serde(default)]
    pub prefers_dark: bool,
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            storage_dir: None,
            prefers_dark: false,
            autosave: default_autosave(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/kanban/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("kanban/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("kanban\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config file, then apply `KANBAN_*` environment overrides.
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Read a TOML config file. A missing or unparsable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty("KANBAN_BOARDS_URL") {
            self.remote.boards_url = Some(url.trim().to_string());
        }
        if let Some(delay) = non_empty("KANBAN_API_DELAY_MS").and_then(|v| v.trim().parse().ok()) {
            self.remote.api_delay_ms = delay;
        }
        if let Some(kind) = non_empty("KANBAN_REMOTE_SOURCE").and_then(|v| RemoteSourceKind::parse(&v)) {
            self.remote.source = kind;
        }
        if let Some(key) = non_empty("KANBAN_TRELLO_KEY") {
            self.remote.trello.key = Some(key);
        }
        if let Some(token) = non_empty("KANBAN_TRELLO_TOKEN") {
            self.remote.trello.token = Some(token);
        }
        if let Some(ids) = non_empty("KANBAN_TRELLO_BOARD_IDS") {
            self.remote.trello.board_ids = ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(dir) = non_empty("KANBAN_STORAGE_DIR") {
            self.storage_dir = Some(PathBuf::from(dir));
        }
    }

    /// Directory used by file storage when no explicit directory is configured.
    pub fn effective_storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|data| data.join("kanban")))
    }
}
