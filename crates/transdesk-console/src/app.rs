//! Session wiring: one HTTP client, one query cache, the resource queries.

use std::sync::Arc;

use transdesk_api::{LocaleApi, LocaleResource, ProjectApi, ProjectResource};
use transdesk_common_config::{BackendConfig, ConsoleConfig};
use transdesk_common_core::Result;
use transdesk_common_http::{HttpClient, HttpConfig};
use transdesk_query::{LocaleQueries, ProjectQueries, QueryClient};

/// Build the HTTP client configuration from the backend section.
pub fn http_config(backend: &BackendConfig) -> HttpConfig {
    let mut config = HttpConfig {
        base_url: backend.base_url.clone(),
        connect_timeout: backend.connect_timeout(),
        request_timeout: backend.request_timeout(),
        accept_invalid_certs: backend.accept_invalid_certs,
        ..HttpConfig::default()
    };
    if let Some(agent) = &backend.user_agent {
        config.user_agent = agent.clone();
    }
    config
}

/// Everything a console session shares.
#[derive(Clone)]
pub struct Console {
    cache: QueryClient,
    projects: ProjectQueries,
    locales: LocaleQueries,
}

impl Console {
    /// Connect to the configured backend.
    ///
    /// A missing base URL is not an error here; requests fail with a
    /// transport error instead.
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        if config.backend.base_url.is_none() {
            tracing::warn!("no backend base URL configured; requests will fail");
        }
        let http = HttpClient::with_config(http_config(&config.backend))?;
        let cache = QueryClient::with_enabled(config.cache.enabled);
        Ok(Self::with_resources(
            cache,
            Arc::new(ProjectApi::new(http.clone())),
            Arc::new(LocaleApi::new(http)),
        ))
    }

    /// Assemble a session over arbitrary resource implementations.
    pub fn with_resources(
        cache: QueryClient,
        projects: Arc<dyn ProjectResource>,
        locales: Arc<dyn LocaleResource>,
    ) -> Self {
        Self {
            projects: ProjectQueries::new(cache.clone(), projects),
            locales: LocaleQueries::new(cache.clone(), locales),
            cache,
        }
    }

    pub fn cache(&self) -> &QueryClient {
        &self.cache
    }

    pub fn projects(&self) -> &ProjectQueries {
        &self.projects
    }

    pub fn locales(&self) -> &LocaleQueries {
        &self.locales
    }
}
