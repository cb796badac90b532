use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use faultline_classifier::{Classified, Classifier};
use faultline_core::{Locale, RequestContext};
use http::{HeaderName, HeaderValue};

use crate::failure::FailureSlot;

/// Shared state of the error boundary middleware
#[derive(Debug)]
pub(crate) struct Boundary {
    pub(crate) classifier: Classifier,
    pub(crate) default_locale: Locale,
    pub(crate) trace_header: HeaderName,
}

/// Outermost faultline layer
///
/// Captures the request context before the handler runs and, when the
/// response carries a parked failure, replaces it with the envelope.
pub(crate) async fn error_boundary(State(boundary): State<Arc<Boundary>>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let context = RequestContext::from_parts(&parts, &boundary.default_locale);

    let mut response = next.run(Request::from_parts(parts, body)).await;

    let Some(FailureSlot(failure)) = response.extensions_mut().remove::<FailureSlot>() else {
        return response;
    };

    let classified = boundary.classifier.classify(&failure, &context);
    envelope_response(&classified, &boundary.trace_header)
}

fn envelope_response(classified: &Classified, trace_header: &HeaderName) -> Response {
    let mut response = (classified.status(), Json(&classified.envelope)).into_response();

    match HeaderValue::from_str(classified.envelope.trace_id()) {
        Ok(value) => {
            response.headers_mut().insert(trace_header.clone(), value);
        }
        Err(e) => tracing::warn!(error = %e, "trace token is not a valid header value"),
    }

    response
}
