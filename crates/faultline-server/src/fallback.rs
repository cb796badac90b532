use faultline_core::ProtocolError;
use http::{Method, Uri};

use crate::ApiError;

/// No route matched the request path
pub(crate) async fn no_route(method: Method, uri: Uri) -> ApiError {
    ApiError::from(ProtocolError::NoRoute {
        method,
        path: uri.path().to_owned(),
    })
}

/// Route matched but has no handler for the method
pub(crate) async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::from(ProtocolError::MethodNotAllowed { method })
}
