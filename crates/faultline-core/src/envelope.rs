use http::StatusCode;
use jiff::Timestamp;
use serde::{Serialize, Serializer};

use crate::FieldViolation;

/// Client-safe error response body
///
/// Built once per failed request and never mutated afterwards.
/// `fieldErrors` is left out of the JSON entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    error_code: String,
    message: String,
    path: String,
    #[serde(serialize_with = "serialize_status")]
    status: StatusCode,
    timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<Vec<FieldViolation>>,
    trace_id: String,
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl ErrorEnvelope {
    /// Start building an envelope from its mandatory parts
    pub fn builder(error_code: impl Into<String>, message: impl Into<String>, status: StatusCode) -> EnvelopeBuilder {
        EnvelopeBuilder {
            error_code: error_code.into(),
            message: message.into(),
            status,
            path: String::new(),
            timestamp: None,
            field_errors: None,
            trace_id: String::new(),
        }
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn field_errors(&self) -> Option<&[FieldViolation]> {
        self.field_errors.as_deref()
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }
}

/// Builder for [`ErrorEnvelope`]
#[derive(Debug)]
#[must_use]
pub struct EnvelopeBuilder {
    error_code: String,
    message: String,
    status: StatusCode,
    path: String,
    timestamp: Option<Timestamp>,
    field_errors: Option<Vec<FieldViolation>>,
    trace_id: String,
}

impl EnvelopeBuilder {
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Pin the timestamp; defaults to the build time
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn field_errors(mut self, field_errors: Vec<FieldViolation>) -> Self {
        self.field_errors = Some(field_errors);
        self
    }

    pub fn trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    pub fn build(self) -> ErrorEnvelope {
        ErrorEnvelope {
            error_code: self.error_code,
            message: self.message,
            path: self.path,
            status: self.status,
            timestamp: self.timestamp.unwrap_or_else(Timestamp::now),
            field_errors: self.field_errors,
            trace_id: self.trace_id,
        }
    }
}
