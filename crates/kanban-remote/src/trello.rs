use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use kanban_core::{KanbanError, KanbanResult, RemoteConfig, TrelloConfig};
use kanban_domain::{Board, Column, Task};
use serde::Deserialize;

use crate::client::{apply_delay, build_client, get_json};
use crate::source::BoardSource;

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCard {
    pub id: String,
    pub id_list: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloBoard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lists: Vec<TrelloList>,
    #[serde(default)]
    pub cards: Vec<TrelloCard>,
}

/// Open lists become columns in Trello order; open cards become their tasks.
pub fn board_from_trello(board: &TrelloBoard) -> Board {
    let columns = board
        .lists
        .iter()
        .filter(|list| !list.closed)
        .map(|list| {
            let tasks = board
                .cards
                .iter()
                .filter(|card| card.id_list == list.id && !card.closed)
                .map(|card| {
                    Task::new(card.name.clone(), list.name.clone())
                        .with_description(card.desc.clone().unwrap_or_default())
                })
                .collect();
            Column::with_tasks(list.name.clone(), tasks)
        })
        .collect();
    Board::with_columns(board.name.clone(), columns)
}

#[derive(Debug, Clone)]
pub struct TrelloSource {
    base_url: String,
    credentials: TrelloConfig,
    timeout: Duration,
    delay: Option<Duration>,
}

impl TrelloSource {
    pub fn from_config(config: &RemoteConfig) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: config.trello.clone(),
            timeout: config.timeout(),
            delay: config.api_delay(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn credentials(&self) -> KanbanResult<(&str, &str)> {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
        }
        match (
            non_empty(&self.credentials.key),
            non_empty(&self.credentials.token),
        ) {
            (Some(key), Some(token)) => Ok((key, token)),
            _ => Err(KanbanError::Configuration(
                "Missing Trello credentials. Set KANBAN_TRELLO_KEY and KANBAN_TRELLO_TOKEN."
                    .to_string(),
            )),
        }
    }

    fn board_ids(&self) -> KanbanResult<&[String]> {
        if self.credentials.board_ids.is_empty() {
            return Err(KanbanError::Configuration(
                "Missing Trello board id. Set KANBAN_TRELLO_BOARD_IDS (comma-separated)."
                    .to_string(),
            ));
        }
        Ok(&self.credentials.board_ids)
    }
}

#[async_trait]
impl BoardSource for TrelloSource {
    async fn fetch_boards(&self) -> KanbanResult<Vec<Board>> {
        let board_ids = self.board_ids()?;
        let (key, token) = self.credentials()?;
        let client = build_client(self.timeout)?;

        let query = [
            ("key", key),
            ("token", token),
            ("lists", "open"),
            ("cards", "open"),
            ("list_fields", "name"),
            ("card_fields", "name,desc,idList"),
        ];
        let requests = board_ids.iter().map(|id| {
            let url = format!("{}/boards/{}", self.base_url, id);
            let client = &client;
            let query = &query;
            async move { get_json::<TrelloBoard>(client, &url, query).await }
        });
        let trello_boards = try_join_all(requests).await?;
        apply_delay(self.delay).await;

        tracing::info!("Fetched {} Trello boards", trello_boards.len());
        Ok(trello_boards.iter().map(board_from_trello).collect())
    }

    fn name(&self) -> &'static str {
        "trello"
    }
}
