use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Error type for handlers behind the faultline boundary
///
/// Anything convertible into [`anyhow::Error`] converts into `ApiError`, so
/// handlers can use `?` on taxonomy errors, constraint violations and
/// arbitrary library errors alike. The response it produces is a
/// placeholder: the boundary middleware swaps it for the classified
/// envelope.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub const fn inner(&self) -> &anyhow::Error {
        &self.0
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

/// Failure parked in response extensions for the boundary to classify
#[derive(Debug, Clone)]
pub(crate) struct FailureSlot(pub(crate) Arc<anyhow::Error>);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(FailureSlot(Arc::new(self.0)));
        response
    }
}
