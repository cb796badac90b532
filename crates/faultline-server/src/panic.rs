use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::ApiError;

/// Turn a caught handler panic into an unclassified failure
///
/// The payload reaches the log record through the catch-all rule; the
/// caller only ever sees the generic message.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn into_failure(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned());

    ApiError::from(anyhow::anyhow!("handler panicked: {message}")).into_response()
}
