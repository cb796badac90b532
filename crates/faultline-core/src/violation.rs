use std::borrow::Cow;
use std::fmt;

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::text::is_blank;
use crate::{BlankValue, ClassifiedError};

/// One normalized, localized validation failure tied to an input field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    field: String,
    rejected_value: Value,
    message: String,
}

impl FieldViolation {
    /// # Errors
    ///
    /// Returns [`BlankValue`] when `field` or `message` is blank
    pub fn new(field: impl Into<String>, rejected_value: Value, message: impl Into<String>) -> Result<Self, BlankValue> {
        let field = field.into();
        if is_blank(&field) {
            return Err(BlankValue::new("field name"));
        }

        let message = message.into();
        if is_blank(&message) {
            return Err(BlankValue::new("field message"));
        }

        Ok(Self {
            field,
            rejected_value,
            message,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub const fn rejected_value(&self) -> &Value {
        &self.rejected_value
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Per-field record produced by a structural validation engine
///
/// `template` is either a catalog key or literal text; `arguments` feed its
/// positional placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct RawViolation {
    pub field: String,
    pub rejected_value: Value,
    pub template: String,
    pub arguments: Option<Vec<Value>>,
}

impl RawViolation {
    pub fn new(field: impl Into<String>, rejected_value: impl Into<Value>, template: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rejected_value: rejected_value.into(),
            template: template.into(),
            arguments: None,
        }
    }

    #[must_use]
    pub fn with_arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.arguments = Some(arguments.into_iter().map(Into::into).collect());
        self
    }
}

/// Where a set of structural violations was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationTarget {
    /// A deserialized request body failed its constraints
    Body,
    /// Query or form parameters failed to bind onto a target object
    Binding,
}

impl fmt::Display for ViolationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => f.write_str("request body"),
            Self::Binding => f.write_str("bound parameters"),
        }
    }
}

/// Multi-field validation failure handed over by the validation engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{count} constraint violation(s) on {target}", count = .violations.len())]
pub struct ConstraintViolations {
    target: ViolationTarget,
    violations: Vec<RawViolation>,
}

impl ConstraintViolations {
    /// Violations found while validating a request body
    pub fn body(violations: impl IntoIterator<Item = RawViolation>) -> Self {
        Self {
            target: ViolationTarget::Body,
            violations: violations.into_iter().collect(),
        }
    }

    /// Violations found while binding request parameters
    pub fn binding(violations: impl IntoIterator<Item = RawViolation>) -> Self {
        Self {
            target: ViolationTarget::Binding,
            violations: violations.into_iter().collect(),
        }
    }

    pub const fn target(&self) -> ViolationTarget {
        self.target
    }

    /// Violations in the order the engine reported them
    pub fn violations(&self) -> &[RawViolation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl ClassifiedError for ConstraintViolations {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_code(&self) -> &str {
        match self.target {
            ViolationTarget::Body => "VALIDATION_FAILED",
            ViolationTarget::Binding => "BINDING_FAILED",
        }
    }

    fn message_key(&self) -> &str {
        match self.target {
            ViolationTarget::Body => "error.validation.failed",
            ViolationTarget::Binding => "error.validation.binding",
        }
    }

    fn message_args(&self) -> Option<Cow<'_, [Value]>> {
        None
    }

    fn default_message(&self) -> Option<&str> {
        match self.target {
            ViolationTarget::Body => Some("Validation failed"),
            ViolationTarget::Binding => Some("Binding validation failed"),
        }
    }
}
