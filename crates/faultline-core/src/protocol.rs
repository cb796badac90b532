use std::borrow::Cow;

use http::{Method, StatusCode};
use serde_json::Value;

use crate::ClassifiedError;
use crate::trace::prefix;

/// Transport or protocol level failure detected before business logic ran
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// Route exists but does not accept the request method
    #[error("method {method} is not supported on this route")]
    MethodNotAllowed { method: Method },

    /// A required query or form parameter is absent
    #[error("missing required parameter `{name}`")]
    MissingParameter { name: String },

    /// A parameter could not be converted to its declared type
    #[error("parameter `{name}` could not be converted to {expected}")]
    TypeMismatch { name: String, expected: String },

    /// The request body could not be read or parsed
    #[error("malformed request body: {detail}")]
    MalformedBody { detail: String },

    /// No route matches the request
    #[error("no route for {method} {path}")]
    NoRoute { method: Method, path: String },
}

impl ProtocolError {
    /// Trace token prefix for this failure category
    pub const fn trace_prefix(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed { .. } => prefix::METHOD,
            Self::MissingParameter { .. } => prefix::PARAMETER,
            Self::TypeMismatch { .. } => prefix::TYPE,
            Self::MalformedBody { .. } => prefix::BODY,
            Self::NoRoute { .. } => prefix::NO_ROUTE,
        }
    }
}

impl ClassifiedError for ProtocolError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NoRoute { .. } => StatusCode::NOT_FOUND,
            Self::MissingParameter { .. } | Self::TypeMismatch { .. } | Self::MalformedBody { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            Self::MissingParameter { .. } => "MISSING_PARAMETER",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::MalformedBody { .. } => "MALFORMED_JSON",
            Self::NoRoute { .. } => "NOT_FOUND",
        }
    }

    fn message_key(&self) -> &str {
        match self {
            Self::MethodNotAllowed { .. } => "http.405",
            Self::MissingParameter { .. } => "error.validation.required",
            Self::TypeMismatch { .. } => "error.validation.type.mismatch",
            Self::MalformedBody { .. } => "error.validation.json.malformed",
            Self::NoRoute { .. } => "http.404",
        }
    }

    fn message_args(&self) -> Option<Cow<'_, [Value]>> {
        match self {
            Self::MissingParameter { name } => Some(Cow::Owned(vec![Value::from(name.as_str())])),
            Self::TypeMismatch { name, expected } => Some(Cow::Owned(vec![
                Value::from(name.as_str()),
                Value::from(expected.as_str()),
            ])),
            Self::MethodNotAllowed { .. } | Self::MalformedBody { .. } | Self::NoRoute { .. } => None,
        }
    }

    fn default_message(&self) -> Option<&str> {
        match self {
            Self::MethodNotAllowed { .. } => Some("Method Not Allowed"),
            Self::MalformedBody { .. } => Some("Malformed JSON request"),
            Self::NoRoute { .. } => Some("Not Found"),
            Self::MissingParameter { .. } | Self::TypeMismatch { .. } => None,
        }
    }
}
