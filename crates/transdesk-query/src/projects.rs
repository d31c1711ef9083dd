//! Project queries and mutations.

use std::sync::Arc;

use serde_json::Value;
use transdesk_api::{Project, ProjectPayload, ProjectResource};
use transdesk_common_async::{run_cancellable, CancellationToken};
use transdesk_common_core::{ensure, Result};

use crate::client::QueryClient;
use crate::key::QueryKey;
use crate::state::QueryState;

/// Cached project reads. Every mutation invalidates `["projects"]`, which
/// covers the list and every project fetched by id.
#[derive(Clone)]
pub struct ProjectQueries {
    client: QueryClient,
    api: Arc<dyn ProjectResource>,
}

impl ProjectQueries {
    pub fn new(client: QueryClient, api: Arc<dyn ProjectResource>) -> Self {
        Self { client, api }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// The project list.
    pub async fn all(&self, token: &CancellationToken) -> Result<Vec<Project>> {
        let api = Arc::clone(&self.api);
        run_cancellable(
            token,
            self.client
                .fetch_query(&QueryKey::projects(), move || async move { api.list().await }),
        )
        .await
    }

    /// One project by id.
    pub async fn by_id(&self, id: &str, token: &CancellationToken) -> Result<Project> {
        let api = Arc::clone(&self.api);
        let id_owned = id.to_string();
        run_cancellable(
            token,
            self.client.fetch_query(&QueryKey::project(id), move || async move {
                api.get(&id_owned).await
            }),
        )
        .await
    }

    pub fn list_state(&self) -> QueryState<Vec<Project>> {
        self.client.get_query_state(&QueryKey::projects())
    }

    pub fn project_state(&self, id: &str) -> QueryState<Project> {
        self.client.get_query_state(&QueryKey::project(id))
    }

    /// Create a project. The payload is validated before any request.
    pub async fn create(&self, payload: &ProjectPayload, token: &CancellationToken) -> Result<Project> {
        payload.validate()?;
        self.client
            .mutate(token, &[QueryKey::projects()], self.api.create(payload))
            .await
    }

    /// Rename a project.
    pub async fn update(
        &self,
        id: &str,
        payload: &ProjectPayload,
        token: &CancellationToken,
    ) -> Result<Project> {
        ensure!(!id.trim().is_empty(), "id", "Project ID is missing");
        payload.validate()?;
        self.client
            .mutate(token, &[QueryKey::projects()], self.api.update(id, payload))
            .await
    }

    /// Delete a project. On success its cached record and locales are dropped.
    pub async fn delete(&self, id: &str, token: &CancellationToken) -> Result<Value> {
        ensure!(!id.trim().is_empty(), "id", "Project ID is missing");
        let deleted = self
            .client
            .mutate(token, &[QueryKey::projects()], self.api.delete(id))
            .await?;
        self.client.remove_queries(&QueryKey::project(id));
        self.client.remove_queries(&QueryKey::locales(id));
        Ok(deleted)
    }
}
