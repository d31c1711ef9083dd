//! HTTP response parsing.

use serde::de::DeserializeOwned;

/// Parse a JSON response body.
///
/// An empty body parses as JSON `null`, so endpoints that answer a delete
/// with `204 No Content` still decode into `serde_json::Value`.
pub async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ResponseError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ResponseError::Read)?;
    decode_body(status.as_u16(), &bytes)
}

pub(crate) fn decode_body<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<T, ResponseError> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };

    serde_json::from_slice(body).map_err(|e| ResponseError::Parse {
        status,
        body: String::from_utf8_lossy(bytes).to_string(),
        source: e,
    })
}

/// Response parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    #[error("failed to parse JSON (status {status}): {source}")]
    Parse {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestData {
        message: String,
    }

    #[test]
    fn test_decode_body() {
        let data: TestData = decode_body(200, br#"{"message":"hi"}"#).unwrap();
        assert_eq!(data.message, "hi");
    }

    #[test]
    fn test_empty_body_is_null() {
        let value: serde_json::Value = decode_body(204, b"").unwrap();
        assert!(value.is_null());
        let value: serde_json::Value = decode_body(200, b"  \n").unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_response_error_display() {
        let err = decode_body::<TestData>(200, b"invalid json").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed to parse JSON"));
        assert!(message.contains("status 200"));
        match err {
            ResponseError::Parse { body, .. } => assert_eq!(body, "invalid json"),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }
}
