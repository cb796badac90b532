//! Extractors whose rejections are classified like any other failure

use axum::extract::path::ErrorKind as PathErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::response::{IntoResponse, Response};
use faultline_core::{ConstraintViolations, ProtocolError, RawViolation};
use http::request::Parts;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ApiError;

/// Structural checks a host type runs on itself after deserialization
///
/// Return one entry per violated constraint; an empty list means valid.
pub trait Validate {
    fn validate(&self) -> Vec<RawViolation>;
}

/// JSON body; any rejection becomes a malformed-body failure
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(request, state)
            .await
            .map(|axum::Json(value)| Self(value))
            .map_err(json_rejection)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::from(ProtocolError::MalformedBody {
        detail: rejection.body_text(),
    })
}

/// Query string
///
/// A missing field becomes a missing-parameter failure, any other
/// deserialization error a type mismatch against `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::try_from_uri(&parts.uri)
            .map(|axum::extract::Query(value)| Self(value))
            .map_err(query_rejection::<T>)
    }
}

fn query_rejection<T>(rejection: QueryRejection) -> ApiError {
    let detail = rejection.body_text();

    if let Some(name) = missing_field(&detail) {
        return ApiError::from(ProtocolError::MissingParameter { name: name.to_owned() });
    }

    let error = match failed_field(&detail) {
        Some((name, message)) => ProtocolError::TypeMismatch {
            name: name.to_owned(),
            expected: expected_label(message).to_owned(),
        },
        None => ProtocolError::TypeMismatch {
            name: "query".to_owned(),
            expected: short_type_name::<T>().to_owned(),
        },
    };

    ApiError::from(anyhow::Error::from(error).context(detail))
}

/// Field name out of serde's "missing field `name`" message
fn missing_field(detail: &str) -> Option<&str> {
    let (_, rest) = detail.split_once("missing field `")?;
    rest.split_once('`').map(|(name, _)| name)
}

/// Leading `<path>: ` segment of a query rejection, with the message after it
fn failed_field(detail: &str) -> Option<(&str, &str)> {
    let rest = detail.split_once("query string: ").map_or(detail, |(_, rest)| rest);
    let (path, message) = rest.split_once(": ")?;

    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '[' | ']'));

    is_path.then_some((path, message))
}

/// Client-facing type label for a field-level parse message
fn expected_label(message: &str) -> &str {
    if let Some((_, expected)) = message.rsplit_once(", expected ") {
        return expected;
    }

    match message {
        "invalid digit found in string"
        | "cannot parse integer from empty string"
        | "number too large to fit in target type"
        | "number too small to fit in target type" => "integer",
        "invalid float literal" => "number",
        m if m.contains("`true` or `false`") => "boolean",
        _ => GENERIC_EXPECTED,
    }
}

const GENERIC_EXPECTED: &str = "a valid value";

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Path parameters; parse failures become type mismatches
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Path(value)| Self(value))
            .map_err(path_rejection)
    }
}

fn path_rejection(rejection: PathRejection) -> ApiError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(failed) => ApiError::from(path_error(failed.into_kind())),
        // Route and extractor disagree; a server-side defect
        other => ApiError::from(anyhow::anyhow!("path extraction failed: {}", other.body_text())),
    }
}

fn path_error(kind: PathErrorKind) -> anyhow::Error {
    let mismatch = |name: String, expected: &str| ProtocolError::TypeMismatch {
        name,
        expected: expected.to_owned(),
    };

    let error = match kind {
        PathErrorKind::ParseErrorAtKey { key, expected_type, .. } => mismatch(key, expected_type),
        PathErrorKind::ParseErrorAtIndex {
            index, expected_type, ..
        } => mismatch(index.to_string(), expected_type),
        PathErrorKind::ParseError { expected_type, .. } => mismatch("path".to_owned(), expected_type),
        PathErrorKind::InvalidUtf8InPathParam { key } => mismatch(key, "UTF-8 text"),
        // serde's own wording stays in the log detail only
        PathErrorKind::DeserializeError { key, message, .. } => {
            return anyhow::Error::from(mismatch(key, GENERIC_EXPECTED)).context(message);
        }
        other => return anyhow::anyhow!("path extraction failed: {other}"),
    };

    error.into()
}

/// JSON body checked with [`Validate`]; violations fail as `VALIDATION_FAILED`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state).await?;

        let violations = value.validate();
        if !violations.is_empty() {
            return Err(ConstraintViolations::body(violations).into());
        }

        Ok(Self(value))
    }
}

/// Query string checked with [`Validate`]; violations fail as `BINDING_FAILED`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

        let violations = value.validate();
        if !violations.is_empty() {
            return Err(ConstraintViolations::binding(violations).into());
        }

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_name_is_extracted() {
        assert_eq!(
            missing_field("Failed to deserialize query string: missing field `page`"),
            Some("page")
        );
        assert_eq!(missing_field("invalid digit found in string"), None);
    }

    #[test]
    fn failed_field_names_the_offending_parameter() {
        assert_eq!(
            failed_field("Failed to deserialize query string: page: invalid digit found in string"),
            Some(("page", "invalid digit found in string"))
        );
        assert_eq!(
            failed_field("Failed to deserialize query string: filter.year: invalid type: string \"x\", expected u16"),
            Some(("filter.year", "invalid type: string \"x\", expected u16"))
        );
        assert_eq!(
            failed_field("Failed to deserialize query string: invalid type: map, expected a sequence"),
            None
        );
        assert_eq!(failed_field("Failed to deserialize query string: unexpected end"), None);
    }

    #[test]
    fn expected_labels_follow_the_parse_message() {
        assert_eq!(expected_label("invalid digit found in string"), "integer");
        assert_eq!(expected_label("invalid float literal"), "number");
        assert_eq!(expected_label("provided string was not `true` or `false`"), "boolean");
        assert_eq!(expected_label("invalid type: string \"x\", expected u16"), "u16");
        assert_eq!(expected_label("unknown variant `blue`"), "a valid value");
    }

    #[test]
    fn path_deserialize_errors_keep_serde_wording_out_of_the_label() {
        let error = path_error(PathErrorKind::DeserializeError {
            key: "id".to_owned(),
            value: "abc".to_owned(),
            message: "custom decoder rejected abc".to_owned(),
        });

        let Some(ProtocolError::TypeMismatch { name, expected }) = error.downcast_ref::<ProtocolError>() else {
            panic!("expected a type mismatch, got {error:#}");
        };
        assert_eq!(name, "id");
        assert_eq!(expected, "a valid value");
        assert!(format!("{error:#}").contains("custom decoder rejected abc"));
    }

    #[test]
    fn type_names_are_shortened() {
        struct Pagination;

        assert_eq!(short_type_name::<Pagination>(), "Pagination");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<u64>(), "u64");
    }
}
