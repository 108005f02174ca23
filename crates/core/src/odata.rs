//! The OData error envelope Graph returns for failed calls, and the status →
//! factory mapping adapters consult when a response is not successful.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GraphError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ODataError {
    #[serde(skip)]
    pub status: u16,
    pub error: MainError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetails>,
    #[serde(rename = "innerError", default, skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<InnerError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InnerError {
    #[serde(rename = "request-id", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(rename = "client-request-id", default, skip_serializing_if = "Option::is_none")]
    pub client_request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl ODataError {
    /// Parse an OData error envelope. Returns `None` when the body is not one.
    pub fn parse(status: u16, body: &[u8]) -> Option<Self> {
        let mut parsed: ODataError = serde_json::from_slice(body).ok()?;
        if parsed.error.code.is_empty() && parsed.error.message.is_empty() {
            return None;
        }
        parsed.status = status;
        Some(parsed)
    }

    pub fn code(&self) -> &str {
        &self.error.code
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }

    pub fn request_id(&self) -> Option<&str> {
        self.error
            .inner_error
            .as_ref()
            .and_then(|e| e.request_id.as_deref())
    }
}

impl fmt::Display for ODataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error.code, self.status, self.error.message)?;
        if let Some(id) = self.request_id() {
            write!(f, " [request-id {id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ODataError {}

/// Builds the error for a failed response.
pub type ErrorFactory = fn(status: u16, body: &[u8]) -> GraphError;

/// Factory turning a Graph error body into [`GraphError::OData`], falling back
/// to [`GraphError::Api`] when the body is not an OData envelope.
pub fn odata_error_factory(status: u16, body: &[u8]) -> GraphError {
    match ODataError::parse(status, body) {
        Some(e) => GraphError::OData(Box::new(e)),
        None => unexpected_status(status, body),
    }
}

pub(crate) fn unexpected_status(status: u16, body: &[u8]) -> GraphError {
    let preview: String = String::from_utf8_lossy(body).chars().take(512).collect();
    let message = if preview.trim().is_empty() {
        "the server returned an unexpected status code and no error body".to_string()
    } else {
        preview
    };
    GraphError::Api { status, message }
}

/// Status-keyed error factories. Keys are exact codes (`"404"`), classes
/// (`"4XX"`, `"5XX"`) or the catch-all `"XXX"`.
#[derive(Clone, Default)]
pub struct ErrorMapping {
    factories: HashMap<String, ErrorFactory>,
}

impl fmt::Debug for ErrorMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("ErrorMapping").field("keys", &keys).finish()
    }
}

impl ErrorMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping used by every Graph builder: 4XX and 5XX become OData errors.
    pub fn odata() -> Self {
        Self::new()
            .with("4XX", odata_error_factory)
            .with("5XX", odata_error_factory)
    }

    pub fn with(mut self, key: &str, factory: ErrorFactory) -> Self {
        self.factories.insert(key.to_ascii_uppercase(), factory);
        self
    }

    /// Exact code first, then status class, then catch-all.
    pub fn resolve(&self, status: u16) -> Option<ErrorFactory> {
        let exact = status.to_string();
        let class = format!("{}XX", status / 100);
        self.factories
            .get(&exact)
            .or_else(|| self.factories.get(&class))
            .or_else(|| self.factories.get("XXX"))
            .copied()
    }

    /// Error for a failed response; generic when no factory matches.
    pub fn error_for(&self, status: u16, body: &[u8]) -> GraphError {
        match self.resolve(status) {
            Some(factory) if !body.is_empty() => factory(status, body),
            _ => unexpected_status(status, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{
        "error": {
            "code": "NotFound",
            "message": "Case not found",
            "details": [{"code": "x", "message": "y"}],
            "innerError": {
                "request-id": "req-1",
                "client-request-id": "client-1",
                "date": "2024-01-01T00:00:00",
                "extra": 1
            }
        }
    }"#;

    #[test]
    fn parses_envelope() {
        let e = ODataError::parse(404, BODY).unwrap();
        assert_eq!(e.code(), "NotFound");
        assert_eq!(e.message(), "Case not found");
        assert_eq!(e.request_id(), Some("req-1"));
        assert_eq!(e.error.details.len(), 1);
        let inner = e.error.inner_error.as_ref().unwrap();
        assert_eq!(inner.additional.get("extra"), Some(&Value::from(1)));
        assert_eq!(e.to_string(), "NotFound (404): Case not found [request-id req-1]");
    }

    #[test]
    fn non_envelope_is_not_odata() {
        assert!(ODataError::parse(500, b"<html>oops</html>").is_none());
        assert!(ODataError::parse(500, br#"{"error":{}}"#).is_none());
    }

    #[test]
    fn resolution_order() {
        fn not_found(status: u16, _: &[u8]) -> GraphError {
            GraphError::Api {
                status,
                message: "custom".into(),
            }
        }
        let mapping = ErrorMapping::odata().with("404", not_found);

        match mapping.error_for(404, BODY) {
            GraphError::Api { message, .. } => assert_eq!(message, "custom"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(mapping.error_for(403, BODY), GraphError::OData(_)));
        assert!(matches!(mapping.error_for(503, BODY), GraphError::OData(_)));
    }

    #[test]
    fn catch_all_and_unmapped() {
        let mapping = ErrorMapping::new().with("XXX", odata_error_factory);
        assert!(matches!(mapping.error_for(418, BODY), GraphError::OData(_)));

        let empty = ErrorMapping::new();
        match empty.error_for(400, BODY) {
            GraphError::Api { status, .. } => assert_eq!(status, 400),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_body_is_generic_error() {
        match ErrorMapping::odata().error_for(500, b"") {
            GraphError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("unexpected status"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
