//! Remote fetch orchestration.
//!
//! At most one fetch runs at a time. The fetch runs as its own tokio task so
//! it settles even when every caller stops waiting; callers arriving while it
//! is in flight await a shared handle to that task and see the same outcome
//! instead of issuing another request.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{AppData, Board};
use serde::Serialize;

use crate::store::KanbanStore;

pub(crate) type InFlightFetch = Shared<BoxFuture<'static, RemoteStatus>>;

/// Progress of the remote fetch. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStatus {
    pub is_loading: bool,
    pub error: Option<String>,
    pub has_fetched: bool,
}

impl KanbanStore {
    /// Fetch boards from the configured source and replace the current boards.
    ///
    /// Joins the in-flight fetch when there is one. On failure the boards are
    /// left untouched and the error message is recorded in the status.
    /// Must be called from within a tokio runtime.
    pub async fn fetch_remote_data(&self) -> RemoteStatus {
        let fetch = {
            let mut slot = self.inner.in_flight.lock();
            match slot.as_ref() {
                Some(fetch) => {
                    tracing::debug!("Joining in-flight remote fetch");
                    fetch.clone()
                }
                None => {
                    self.commit("remote/fetchStarted", |state| {
                        state.remote.is_loading = true;
                        state.remote.error = None;
                        Some(())
                    });
                    let task = tokio::spawn(self.clone().run_fetch());
                    let store = self.clone();
                    let fetch = async move {
                        match task.await {
                            Ok(status) => status,
                            Err(e) => store.settle(Err(KanbanError::Internal(format!(
                                "Remote fetch task failed: {}",
                                e
                            )))),
                        }
                    }
                    .boxed()
                    .shared();
                    *slot = Some(fetch.clone());
                    fetch
                }
            }
        };
        fetch.await
    }

    /// Fetch only if nothing has been fetched yet and no fetch is running.
    pub async fn ensure_remote_data_loaded(&self) -> RemoteStatus {
        let status = self.remote_status();
        if status.has_fetched || status.is_loading {
            return status;
        }
        self.fetch_remote_data().await
    }

    async fn run_fetch(self) -> RemoteStatus {
        let result = match &self.inner.source {
            Some(source) => {
                tracing::info!("Fetching boards from {}", source.name());
                source.fetch_boards().await
            }
            None => Err(KanbanError::Configuration(
                "No remote board source configured".to_string(),
            )),
        };

        self.settle(result)
    }

    /// Commit the outcome of a fetch and free the in-flight slot.
    fn settle(&self, result: KanbanResult<Vec<Board>>) -> RemoteStatus {
        let status = match result {
            Ok(boards) => {
                tracing::info!("Remote fetch returned {} boards", boards.len());
                self.commit("remote/fetchSucceeded", |state| {
                    state.data = Arc::new(AppData::new(boards));
                    state.remote = RemoteStatus {
                        is_loading: false,
                        error: None,
                        has_fetched: true,
                    };
                    Some(state.remote.clone())
                })
            }
            Err(e) => {
                tracing::warn!("Remote fetch failed: {}", e);
                self.commit("remote/fetchFailed", |state| {
                    state.remote.is_loading = false;
                    state.remote.error = Some(e.to_string());
                    Some(state.remote.clone())
                })
            }
        };

        *self.inner.in_flight.lock() = None;
        status.unwrap_or_else(|| self.remote_status())
    }
}
