use std::borrow::Cow;

use http::StatusCode;
use serde_json::Value;

use crate::StatusClass;

/// Failure that knows how it should be presented over HTTP
///
/// Implemented by every failure type the classifier understands natively.
/// The server layer turns these into responses, keeping the failure types
/// themselves decoupled from axum.
pub trait ClassifiedError: std::error::Error {
    /// HTTP status code for this failure
    fn status_code(&self) -> StatusCode;

    /// Stable machine-readable code (e.g. `ORDER_NOT_PAYABLE`)
    fn error_code(&self) -> &str;

    /// Catalog key used to produce the client-facing message
    fn message_key(&self) -> &str;

    /// Positional arguments for the message template
    fn message_args(&self) -> Option<Cow<'_, [Value]>> {
        None
    }

    /// Text shown when the catalog has no entry for [`Self::message_key`]
    ///
    /// `None` means the key itself is shown.
    fn default_message(&self) -> Option<&str> {
        None
    }

    /// Whether the caller or the service is at fault
    fn status_class(&self) -> StatusClass {
        if self.status_code().is_server_error() {
            StatusClass::ServerError
        } else {
            StatusClass::ClientError
        }
    }
}
