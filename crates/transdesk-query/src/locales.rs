//! Locale queries and mutations, scoped per project.

use std::sync::Arc;

use serde_json::Value;
use transdesk_api::locale::require_project_id;
use transdesk_api::{Locale, LocalePayload, LocaleResource};
use transdesk_common_async::{run_cancellable, CancellationToken};
use transdesk_common_core::Result;

use crate::client::QueryClient;
use crate::key::QueryKey;
use crate::state::QueryState;

/// Cached locale reads keyed by `["locales", project_id]`.
#[derive(Clone)]
pub struct LocaleQueries {
    client: QueryClient,
    api: Arc<dyn LocaleResource>,
}

impl LocaleQueries {
    pub fn new(client: QueryClient, api: Arc<dyn LocaleResource>) -> Self {
        Self { client, api }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// Locales of one project. A blank id fails before the cache is touched.
    pub async fn all(&self, project_id: &str, token: &CancellationToken) -> Result<Vec<Locale>> {
        require_project_id(project_id)?;
        let api = Arc::clone(&self.api);
        let pid = project_id.to_string();
        run_cancellable(
            token,
            self.client
                .fetch_query(&QueryKey::locales(project_id), move || async move {
                    api.list(&pid).await
                }),
        )
        .await
    }

    pub fn state(&self, project_id: &str) -> QueryState<Vec<Locale>> {
        self.client.get_query_state(&QueryKey::locales(project_id))
    }

    pub async fn create(&self, payload: &LocalePayload, token: &CancellationToken) -> Result<Locale> {
        payload.validate()?;
        self.client
            .mutate(
                token,
                &[QueryKey::locales(&payload.project_id)],
                self.api.create(payload),
            )
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &LocalePayload,
        token: &CancellationToken,
    ) -> Result<Locale> {
        payload.validate()?;
        self.client
            .mutate(
                token,
                &[QueryKey::locales(&payload.project_id)],
                self.api.update(id, payload),
            )
            .await
    }

    /// Delete a locale. `project_id` names the list to invalidate.
    pub async fn delete(&self, project_id: &str, id: &str, token: &CancellationToken) -> Result<Value> {
        require_project_id(project_id)?;
        self.client
            .mutate(token, &[QueryKey::locales(project_id)], self.api.delete(id))
            .await
    }
}
