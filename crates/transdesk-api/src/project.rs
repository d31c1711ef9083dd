//! Project resource client.

use async_trait::async_trait;
use serde_json::Value;
use transdesk_common_core::Result;
use transdesk_common_http::HttpClient;

use crate::model::{Project, ProjectPayload};

const ENDPOINT: &str = "projects";

/// CRUD over the `/projects` collection.
#[async_trait]
pub trait ProjectResource: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>>;
    async fn get(&self, id: &str) -> Result<Project>;
    async fn create(&self, payload: &ProjectPayload) -> Result<Project>;
    async fn update(&self, id: &str, payload: &ProjectPayload) -> Result<Project>;
    /// The acknowledgement body is untyped; an empty body is `Value::Null`.
    async fn delete(&self, id: &str) -> Result<Value>;
}

/// HTTP implementation of [`ProjectResource`].
#[derive(Debug, Clone)]
pub struct ProjectApi {
    http: HttpClient,
}

impl ProjectApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ProjectResource for ProjectApi {
    async fn list(&self) -> Result<Vec<Project>> {
        Ok(self.http.get_json(&[ENDPOINT]).await?)
    }

    async fn get(&self, id: &str) -> Result<Project> {
        Ok(self.http.get_json(&[ENDPOINT, id]).await?)
    }

    async fn create(&self, payload: &ProjectPayload) -> Result<Project> {
        tracing::debug!(name = %payload.name, "creating project");
        Ok(self.http.post_json(&[ENDPOINT], payload).await?)
    }

    async fn update(&self, id: &str, payload: &ProjectPayload) -> Result<Project> {
        tracing::debug!(id, name = %payload.name, "updating project");
        Ok(self.http.put_json(&[ENDPOINT, id], payload).await?)
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        tracing::debug!(id, "deleting project");
        Ok(self.http.delete_json(&[ENDPOINT, id]).await?)
    }
}
