//! Shared HTTP plumbing for the remote sources.

use std::time::Duration;

use kanban_core::{KanbanError, KanbanResult};
use reqwest::Client;
use serde::de::DeserializeOwned;

pub fn build_client(timeout: Duration) -> KanbanResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| KanbanError::Internal(format!("Failed to build HTTP client: {e}")))
}

/// GET `url` and decode the JSON body.
///
/// Transport failures and non-success statuses are connection errors; a body
/// that does not decode into `T` is a malformed payload.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> KanbanResult<T> {
    tracing::debug!("GET {}", url);
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| KanbanError::Connection(format!("Request to {url} failed: {e}")))?;

    response
        .json::<T>()
        .await
        .map_err(|e| KanbanError::MalformedPayload(format!("Unexpected response from {url}: {e}")))
}

/// Artificial latency applied after a response, for exercising loading states.
pub async fn apply_delay(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}
