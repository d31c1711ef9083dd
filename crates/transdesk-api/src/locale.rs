//! Locale resource client.

use async_trait::async_trait;
use serde_json::Value;
use transdesk_common_core::{ensure, Result};
use transdesk_common_http::HttpClient;

use crate::model::{Locale, LocalePayload};

const ENDPOINT: &str = "locales";

/// CRUD over the `/locales` collection, listed per project.
#[async_trait]
pub trait LocaleResource: Send + Sync {
    /// Fails with a validation error, without a request, on a blank id.
    async fn list(&self, project_id: &str) -> Result<Vec<Locale>>;
    async fn create(&self, payload: &LocalePayload) -> Result<Locale>;
    async fn update(&self, id: &str, payload: &LocalePayload) -> Result<Locale>;
    async fn delete(&self, id: &str) -> Result<Value>;
}

/// Precondition shared by every [`LocaleResource::list`] implementation.
pub fn require_project_id(project_id: &str) -> Result<()> {
    ensure!(!project_id.trim().is_empty(), "projectId", "Project ID is required");
    Ok(())
}

/// HTTP implementation of [`LocaleResource`].
#[derive(Debug, Clone)]
pub struct LocaleApi {
    http: HttpClient,
}

impl LocaleApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LocaleResource for LocaleApi {
    async fn list(&self, project_id: &str) -> Result<Vec<Locale>> {
        require_project_id(project_id)?;
        Ok(self.http.get_json(&[ENDPOINT, "project", project_id]).await?)
    }

    async fn create(&self, payload: &LocalePayload) -> Result<Locale> {
        tracing::debug!(project_id = %payload.project_id, locale = %payload.locale, "creating locale");
        Ok(self.http.post_json(&[ENDPOINT], payload).await?)
    }

    async fn update(&self, id: &str, payload: &LocalePayload) -> Result<Locale> {
        tracing::debug!(id, locale = %payload.locale, "updating locale");
        Ok(self.http.put_json(&[ENDPOINT, id], payload).await?)
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        tracing::debug!(id, "deleting locale");
        Ok(self.http.delete_json(&[ENDPOINT, id]).await?)
    }
}
