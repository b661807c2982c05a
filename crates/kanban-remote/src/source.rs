use std::sync::Arc;

use async_trait::async_trait;
use kanban_core::{KanbanResult, RemoteConfig, RemoteSourceKind};
use kanban_domain::Board;

use crate::{HttpBoardSource, JsonPlaceholderSource, TrelloSource};

/// Where fetched boards come from.
///
/// A source produces a complete, normalized board list; the store replaces
/// its boards with the result. Transport, configuration and payload problems
/// are all reported as errors and never partially applied.
#[async_trait]
pub trait BoardSource: Send + Sync {
    async fn fetch_boards(&self) -> KanbanResult<Vec<Board>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Build the source selected by `config.source`.
///
/// Configuration problems (missing URL, credentials) are not checked here;
/// they surface from `fetch_boards` so that they show up as fetch errors.
pub fn source_from_config(config: &RemoteConfig) -> Arc<dyn BoardSource> {
    match config.source {
        RemoteSourceKind::Api => Arc::new(HttpBoardSource::from_config(config)),
        RemoteSourceKind::JsonPlaceholder => Arc::new(JsonPlaceholderSource::from_config(config)),
        RemoteSourceKind::Trello => Arc::new(TrelloSource::from_config(config)),
    }
}
