use http::{Method, header};

use crate::Locale;

/// Request facts the classifier needs to build an envelope
///
/// Built by the HTTP boundary for every failed request; the locale is passed
/// explicitly into message resolution rather than read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Request method
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Locale used to resolve client-facing messages
    pub locale: Locale,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>, locale: Locale) -> Self {
        Self {
            method,
            path: path.into(),
            locale,
        }
    }

    /// Create a context for failures raised outside an HTTP request
    ///
    /// Uses `GET` and an empty path.
    pub fn empty(locale: Locale) -> Self {
        Self::new(Method::GET, String::new(), locale)
    }

    /// Derive the context from request parts
    ///
    /// The locale comes from `Accept-Language` when it names a usable tag,
    /// otherwise `default_locale` is used.
    pub fn from_parts(parts: &http::request::Parts, default_locale: &Locale) -> Self {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(Locale::from_accept_language)
            .unwrap_or_else(|| default_locale.clone());

        Self::new(parts.method.clone(), parts.uri.path(), locale)
    }
}
