//! HTTP client configuration and JSON verbs.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::request::RequestBuilder;
use crate::response::{parse_json, ResponseError};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Backend base URL. `None` makes every request fail at the transport layer.
    pub base_url: Option<String>,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// Accept invalid TLS certificates (self-signed development backends).
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("transdesk/{}", env!("CARGO_PKG_VERSION")),
            pool_max_idle_per_host: 10,
            accept_invalid_certs: false,
        }
    }
}

/// HTTP errors.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid request URL: {message}")]
    InvalidUrl { message: String },

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("server error: {status}")]
    ServerError { status: u16, body: String },

    #[error("client error: {status}")]
    ClientError { status: u16, body: String },

    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Request(e)
        }
    }
}

impl From<HttpError> for transdesk_common_core::Error {
    fn from(e: HttpError) -> Self {
        use transdesk_common_core::Error;

        match e {
            HttpError::ServerError { status, body } | HttpError::ClientError { status, body } => {
                Error::server(status, body)
            }
            HttpError::Response(ResponseError::Parse { source, .. }) => {
                Error::decode(source.to_string())
            }
            HttpError::Response(ResponseError::Read(source)) => Error::transport(source.to_string()),
            HttpError::Request(source) => Error::transport(source.to_string()),
            HttpError::ClientBuild(source) => Error::config(source.to_string()),
            other @ (HttpError::InvalidUrl { .. } | HttpError::Timeout) => {
                Error::transport(other.to_string())
            }
        }
    }
}

/// Build a configured reqwest client.
fn build_client(config: &HttpConfig) -> Result<Client, HttpError> {
    let mut builder = ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .pool_max_idle_per_host(config.pool_max_idle_per_host);

    if config.accept_invalid_certs {
        tracing::warn!("TLS certificate verification is disabled for the backend client");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().map_err(HttpError::ClientBuild)
}

/// JSON client bound to the backend base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    request: RequestBuilder,
}

impl HttpClient {
    /// Create a client with default settings and the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, HttpError> {
        Self::with_config(HttpConfig {
            base_url: Some(base_url.into()),
            ..HttpConfig::default()
        })
    }

    /// Create a new HTTP client with custom config.
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        let inner = build_client(&config)?;
        let mut request = RequestBuilder::new().json_content();
        if let Some(base) = config.base_url {
            request = request.base_url(base);
        }
        Ok(Self { inner, request })
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.request.base()
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, HttpError> {
        self.send::<(), T>(Method::GET, segments, None).await
    }

    /// POST a JSON body and decode the JSON answer.
    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, segments, Some(body)).await
    }

    /// PUT a JSON body and decode the JSON answer.
    pub async fn put_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, segments, Some(body)).await
    }

    /// DELETE a resource. The answer is returned untyped.
    pub async fn delete_json(&self, segments: &[&str]) -> Result<serde_json::Value, HttpError> {
        self.send::<(), serde_json::Value>(Method::DELETE, segments, None)
            .await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.request.url(segments)?;
        tracing::debug!(method = %method, url = %url, "sending request");

        let mut request = self
            .inner
            .request(method.clone(), url.clone())
            .headers(self.request.headers().clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(HttpError::from)?;
        tracing::debug!(method = %method, url = %url, status = response.status().as_u16(), "received response");

        let response = Self::check_response(response).await?;
        Ok(parse_json(response).await?)
    }

    /// Check response status and convert errors.
    pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            Err(HttpError::ServerError {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(HttpError::ClientError {
                status: status.as_u16(),
                body,
            })
        }
    }
}
