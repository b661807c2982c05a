use std::time::Duration;

use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult, RemoteConfig};
use kanban_domain::{normalize_boards, Board};

use crate::client::{apply_delay, build_client, get_json};
use crate::source::BoardSource;

const MISSING_URL_MESSAGE: &str = "Missing KANBAN_BOARDS_URL. Set KANBAN_BOARDS_URL=<url> \
     in the environment or `remote.boards_url` in the config file.";
const PLACEHOLDER: &str = "YOUR_PROJECT";

/// Fetches boards from an endpoint returning `[...]` or `{ "boards": [...] }`.
#[derive(Debug, Clone)]
pub struct HttpBoardSource {
    boards_url: Option<String>,
    timeout: Duration,
    delay: Option<Duration>,
}

impl HttpBoardSource {
    pub fn new(boards_url: impl Into<String>) -> Self {
        Self {
            boards_url: Some(boards_url.into()),
            timeout: RemoteConfig::default().timeout(),
            delay: None,
        }
    }

    pub fn from_config(config: &RemoteConfig) -> Self {
        Self {
            boards_url: config.boards_url.clone(),
            timeout: config.timeout(),
            delay: config.api_delay(),
        }
    }

    /// The configured URL, rejecting missing and placeholder values.
    pub fn boards_url(&self) -> KanbanResult<&str> {
        let url = self
            .boards_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| KanbanError::Configuration(MISSING_URL_MESSAGE.to_string()))?;

        if url.to_ascii_uppercase().contains(PLACEHOLDER) {
            return Err(KanbanError::Configuration(
                "KANBAN_BOARDS_URL is still set to the placeholder value. \
                 Replace it with your real endpoint (it should end with /boards)."
                    .to_string(),
            ));
        }
        Ok(url)
    }
}

#[async_trait]
impl BoardSource for HttpBoardSource {
    async fn fetch_boards(&self) -> KanbanResult<Vec<Board>> {
        let url = self.boards_url()?;
        let client = build_client(self.timeout)?;
        let payload: serde_json::Value = get_json(&client, url, &[]).await?;
        apply_delay(self.delay).await;

        let boards = normalize_boards(&payload)?;
        tracing::info!("Fetched {} boards from {}", boards.len(), url);
        Ok(boards)
    }

    fn name(&self) -> &'static str {
        "api"
    }
}
