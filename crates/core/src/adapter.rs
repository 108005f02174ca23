use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::error::{GraphError, Result};
use crate::odata::ErrorMapping;
use crate::request::RequestInformation;

/// Executes requests and turns responses into JSON nodes or raw bytes.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    /// Base URL substituted for `{+baseurl}` in templates.
    fn base_url(&self) -> &str;

    /// Send and return the JSON root, or `None` for 204 / empty responses.
    async fn send(&self, info: RequestInformation, errors: &ErrorMapping) -> Result<Option<Value>>;

    /// Send and discard the response body.
    async fn send_no_content(&self, info: RequestInformation, errors: &ErrorMapping) -> Result<()>;

    /// Send and return the raw body, or `None` for 204 / empty responses.
    async fn send_primitive(
        &self,
        info: RequestInformation,
        errors: &ErrorMapping,
    ) -> Result<Option<Bytes>>;
}

/// Map a failed status through `errors`. Successful statuses pass.
pub fn check_status(status: u16, body: &[u8], errors: &ErrorMapping) -> Result<()> {
    if status < 400 {
        return Ok(());
    }
    Err(errors.error_for(status, body))
}

/// `None` when the response carries no content.
pub fn body_or_none(status: u16, body: Bytes) -> Option<Bytes> {
    if status == 204 || body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(body)
    }
}

/// Parse the JSON root of a successful response.
pub fn parse_json_root(status: u16, body: Bytes) -> Result<Option<Value>> {
    match body_or_none(status, body) {
        None => Ok(None),
        Some(body) => serde_json::from_slice(&body)
            .map(Some)
            .map_err(GraphError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_content_yields_none() {
        assert!(parse_json_root(204, Bytes::new()).unwrap().is_none());
        assert!(parse_json_root(200, Bytes::from_static(b"  \n")).unwrap().is_none());
    }

    #[test]
    fn json_root_is_parsed() {
        let node = parse_json_root(200, Bytes::from_static(br#"{"id":"1"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(node, json!({"id": "1"}));
    }

    #[test]
    fn invalid_json_is_serialization_error() {
        let err = parse_json_root(200, Bytes::from_static(b"{nope")).unwrap_err();
        assert!(matches!(err, GraphError::Serialization(_)));
    }

    #[test]
    fn failed_status_goes_through_mapping() {
        let body = br#"{"error":{"code":"Forbidden","message":"no"}}"#;
        let err = check_status(403, body, &ErrorMapping::odata()).unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(matches!(err, GraphError::OData(_)));
        assert!(check_status(201, b"", &ErrorMapping::odata()).is_ok());
    }
}
