use std::borrow::Cow;
use std::fmt;

use faultline_core::{EnvelopeBuilder, ErrorEnvelope, Locale, RequestContext, StatusClass, trace};
use faultline_i18n::MessageResolver;
use http::StatusCode;

/// Log level of the record paired with an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client-category failure
    Warning,
    /// Service-side failure, logged with full detail
    Error,
}

impl From<StatusClass> for Severity {
    fn from(class: StatusClass) -> Self {
        match class {
            StatusClass::ClientError => Self::Warning,
            StatusClass::ServerError => Self::Error,
        }
    }
}

/// What a rule hands back to the classifier
///
/// The classifier emits the log record; rules never log themselves.
#[derive(Debug)]
pub struct Outcome {
    pub(crate) envelope: ErrorEnvelope,
    pub(crate) severity: Severity,
    pub(crate) summary: Cow<'static, str>,
    pub(crate) detail: Option<String>,
}

impl Outcome {
    pub fn new(envelope: ErrorEnvelope, severity: Severity, summary: impl Into<Cow<'static, str>>) -> Self {
        Self {
            envelope,
            severity,
            summary: summary.into(),
            detail: None,
        }
    }

    /// Operator-only detail for the log record
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Request-scoped services available to rule handlers
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    resolver: &'a MessageResolver,
    request: &'a RequestContext,
}

impl<'a> RuleContext<'a> {
    pub(crate) const fn new(resolver: &'a MessageResolver, request: &'a RequestContext) -> Self {
        Self { resolver, request }
    }

    pub const fn resolver(&self) -> &'a MessageResolver {
        self.resolver
    }

    pub const fn request(&self) -> &'a RequestContext {
        self.request
    }

    pub const fn locale(&self) -> &'a Locale {
        &self.request.locale
    }

    /// Envelope builder with the request path and a fresh `prefix` trace token
    pub fn envelope(
        &self,
        error_code: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
        trace_prefix: &str,
    ) -> EnvelopeBuilder {
        ErrorEnvelope::builder(error_code, message, status)
            .path(self.request.path.as_str())
            .trace_id(trace::generate_with_prefix(trace_prefix))
    }
}

/// Predicate deciding whether a rule applies
pub type Matcher = fn(&anyhow::Error) -> bool;

/// Handler producing the envelope for a matched failure
pub type Handler = fn(&RuleContext<'_>, &anyhow::Error) -> Outcome;

/// One `(predicate, handler)` entry of the classification policy
#[derive(Clone, Copy)]
pub struct Rule {
    name: &'static str,
    matches: Matcher,
    handle: Handler,
}

impl Rule {
    pub const fn new(name: &'static str, matches: Matcher, handle: Handler) -> Self {
        Self { name, matches, handle }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn matches(&self, failure: &anyhow::Error) -> bool {
        (self.matches)(failure)
    }

    pub(crate) fn handle(&self, ctx: &RuleContext<'_>, failure: &anyhow::Error) -> Outcome {
        (self.handle)(ctx, failure)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}
