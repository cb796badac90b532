use std::borrow::Cow;
use std::fmt;

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::{ClassifiedError, ErrorCode, MessageKey};

/// Boxed underlying failure carried as a cause
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Who is at fault for a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    ClientError,
    ServerError,
}

impl StatusClass {
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::ClientError)
    }
}

/// Category of a [`TaxonomyError`] together with its status policy
///
/// Business and technical failures carry an overridable status; validation
/// and not-found failures have a fixed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expected domain-rule violation
    Business { status: StatusCode },
    /// Infrastructure or system failure
    Technical { status: StatusCode },
    /// Single-condition input violation raised by business logic
    Validation,
    /// Referenced resource is absent
    NotFound,
}

impl ErrorKind {
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Business { status } | Self::Technical { status } => status,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub const fn status_class(self) -> StatusClass {
        match self {
            Self::Technical { .. } => StatusClass::ServerError,
            Self::Business { .. } | Self::Validation | Self::NotFound => StatusClass::ClientError,
        }
    }

    /// Lowercase category name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::Business { .. } => "business",
            Self::Technical { .. } => "technical",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
        }
    }
}

/// Typed, classified failure raised by business logic
///
/// Travels unmodified to the request boundary, where the classifier turns it
/// into an envelope. Only the message key and arguments reach the caller;
/// the cause is kept for the operator log.
pub struct TaxonomyError {
    kind: ErrorKind,
    code: ErrorCode,
    message_key: MessageKey,
    message_args: Option<Vec<Value>>,
    cause: Option<BoxError>,
}

impl TaxonomyError {
    const fn of_kind(kind: ErrorKind, code: ErrorCode, message_key: MessageKey) -> Self {
        Self {
            kind,
            code,
            message_key,
            message_args: None,
            cause: None,
        }
    }

    /// Domain-rule violation, `400 Bad Request` unless overridden
    pub const fn business(code: ErrorCode, message_key: MessageKey) -> Self {
        Self::of_kind(
            ErrorKind::Business {
                status: StatusCode::BAD_REQUEST,
            },
            code,
            message_key,
        )
    }

    /// Infrastructure failure, `500 Internal Server Error` unless overridden
    pub const fn technical(code: ErrorCode, message_key: MessageKey) -> Self {
        Self::of_kind(
            ErrorKind::Technical {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            code,
            message_key,
        )
    }

    /// Explicit input violation, always `400 Bad Request`
    pub const fn validation(code: ErrorCode, message_key: MessageKey) -> Self {
        Self::of_kind(ErrorKind::Validation, code, message_key)
    }

    /// Missing resource, always `404 Not Found`
    pub const fn not_found(code: ErrorCode, message_key: MessageKey) -> Self {
        Self::of_kind(ErrorKind::NotFound, code, message_key)
    }

    /// Attach positional message arguments
    #[must_use]
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.message_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Attach the underlying failure
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Override the status of a business or technical failure
    ///
    /// Validation and not-found failures keep their fixed status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        match self.kind {
            ErrorKind::Business { .. } => self.kind = ErrorKind::Business { status },
            ErrorKind::Technical { .. } => self.kind = ErrorKind::Technical { status },
            ErrorKind::Validation | ErrorKind::NotFound => {}
        }
        self
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn code(&self) -> &ErrorCode {
        &self.code
    }

    pub const fn key(&self) -> &MessageKey {
        &self.message_key
    }

    pub fn args(&self) -> Option<&[Value]> {
        self.message_args.as_deref()
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Debug for TaxonomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxonomyError")
            .field("kind", &self.kind)
            .field("code", &self.code.as_str())
            .field("message_key", &self.message_key.as_str())
            .field("message_args", &self.message_args)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for TaxonomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error {} ({})", self.kind.name(), self.code, self.message_key)
    }
}

impl std::error::Error for TaxonomyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl ClassifiedError for TaxonomyError {
    fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    fn error_code(&self) -> &str {
        self.code.as_str()
    }

    fn message_key(&self) -> &str {
        self.message_key.as_str()
    }

    fn message_args(&self) -> Option<Cow<'_, [Value]>> {
        self.message_args.as_deref().map(Cow::Borrowed)
    }

    fn status_class(&self) -> StatusClass {
        self.kind.status_class()
    }
}
