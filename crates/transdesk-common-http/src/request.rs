//! Request headers and URL construction.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::client::HttpError;

/// Common HTTP headers.
pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Default headers and base URL shared by every request.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    headers: HeaderMap,
    base_url: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Send and accept JSON.
    pub fn json_content(mut self) -> Self {
        let json = HeaderValue::from_static(headers::CONTENT_TYPE_JSON);
        self.headers.insert(CONTENT_TYPE, json.clone());
        self.headers.insert(ACCEPT, json);
        self
    }

    /// Get the built headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The configured base URL, if any.
    pub fn base(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Join path segments onto the base URL.
    ///
    /// Each segment is percent-encoded, so identifiers containing `/` or
    /// spaces cannot escape their position in the path. A base URL with a
    /// path prefix (`https://host/api/`) keeps the prefix.
    pub fn url(&self, segments: &[&str]) -> Result<Url, HttpError> {
        let base = self
            .base_url
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| HttpError::InvalidUrl {
                message: "no backend base URL configured".to_string(),
            })?;

        let mut url = Url::parse(base).map_err(|e| HttpError::InvalidUrl {
            message: format!("{}: {}", base, e),
        })?;

        {
            let mut path = url.path_segments_mut().map_err(|_| HttpError::InvalidUrl {
                message: format!("{} cannot be a base URL", base),
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_segments() {
        let builder = RequestBuilder::new().base_url("https://api.example.com");
        let url = builder.url(&["projects", "42"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/projects/42");
    }

    #[test]
    fn test_url_trailing_slash() {
        let builder = RequestBuilder::new().base_url("https://api.example.com/");
        let url = builder.url(&["projects"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/projects");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let builder = RequestBuilder::new().base_url("https://api.example.com/v1/");
        let url = builder.url(&["locales", "project", "p1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/locales/project/p1");
    }

    #[test]
    fn test_url_encodes_segments() {
        let builder = RequestBuilder::new().base_url("https://api.example.com");
        let url = builder.url(&["projects", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/projects/a%2Fb%20c");
    }

    #[test]
    fn test_url_without_base_fails() {
        let builder = RequestBuilder::new();
        assert!(matches!(
            builder.url(&["projects"]),
            Err(HttpError::InvalidUrl { .. })
        ));

        let builder = RequestBuilder::new().base_url("  ");
        assert!(builder.url(&["projects"]).is_err());
    }

    #[test]
    fn test_url_with_garbage_base_fails() {
        let builder = RequestBuilder::new().base_url("not a url");
        assert!(builder.url(&["projects"]).is_err());
    }

    #[test]
    fn test_json_content() {
        let builder = RequestBuilder::new().json_content();
        let content_type = builder.headers().get(CONTENT_TYPE).unwrap();
        assert_eq!(content_type.to_str().unwrap(), headers::CONTENT_TYPE_JSON);
        assert!(builder.headers().contains_key(ACCEPT));
    }

    #[test]
    fn test_custom_header() {
        let builder = RequestBuilder::new().header("X-Console", "transdesk");
        let custom = builder.headers().get("X-Console").unwrap();
        assert_eq!(custom.to_str().unwrap(), "transdesk");
    }

    #[test]
    fn test_invalid_header_ignored() {
        let builder = RequestBuilder::new().header("bad header", "value");
        assert!(builder.headers().is_empty());
    }
}
