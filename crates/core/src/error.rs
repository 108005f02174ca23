use thiserror::Error;

use crate::odata::ODataError;

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The service answered with an OData error envelope.
    #[error(transparent)]
    OData(#[from] Box<ODataError>),

    /// Non-success status without a usable error envelope or registered factory.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid URL template '{template}': {reason}")]
    UrlTemplate { template: String, reason: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("response for {0} had no body")]
    MissingBody(String),

    #[error("unexpected payload: {0}")]
    Deserialization(String),
}

impl GraphError {
    /// HTTP status of the failed response, when the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GraphError::OData(e) => Some(e.status),
            GraphError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<ODataError> for GraphError {
    fn from(e: ODataError) -> Self {
        GraphError::OData(Box::new(e))
    }
}

impl From<url::ParseError> for GraphError {
    fn from(e: url::ParseError) -> Self {
        GraphError::InvalidUrl(e.to_string())
    }
}
