use faultline_core::{ErrorEnvelope, RequestContext};
use faultline_i18n::MessageResolver;
use http::StatusCode;

use crate::builtin::{CATCH_ALL, RULES};
use crate::{Outcome, Rule, RuleContext, Severity};

/// Result of classifying one failure
#[derive(Debug)]
pub struct Classified {
    /// Envelope to send to the caller
    pub envelope: ErrorEnvelope,
    /// Name of the rule that produced it
    pub rule: &'static str,
    /// Level the paired log record was emitted at
    pub severity: Severity,
}

impl Classified {
    /// HTTP status to respond with; always equal to the envelope status
    pub const fn status(&self) -> StatusCode {
        self.envelope.status()
    }
}

/// Routes a raised failure to the rule that knows how to present it
///
/// Evaluation order: rules registered with [`Classifier::with_rule`] in
/// registration order, then the built-in taxonomy, constraint and protocol
/// rules, then the catch-all.
#[derive(Debug, Clone)]
pub struct Classifier {
    resolver: MessageResolver,
    custom: Vec<Rule>,
}

impl Classifier {
    pub const fn new(resolver: MessageResolver) -> Self {
        Self {
            resolver,
            custom: Vec::new(),
        }
    }

    /// Register a rule evaluated ahead of the built-in ones
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.custom.push(rule);
        self
    }

    pub const fn resolver(&self) -> &MessageResolver {
        &self.resolver
    }

    /// Rule names in evaluation order, catch-all last
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules().map(Rule::name).collect()
    }

    fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.custom.iter().chain(RULES.iter()).chain(std::iter::once(&CATCH_ALL))
    }

    /// Classify `failure` raised while serving `request`
    ///
    /// Emits exactly one log record: a warning for client-category failures,
    /// an error carrying the full failure chain otherwise.
    pub fn classify(&self, failure: &anyhow::Error, request: &RequestContext) -> Classified {
        let ctx = RuleContext::new(&self.resolver, request);

        let rule = self
            .rules()
            .find(|rule| rule.matches(failure))
            .unwrap_or(&CATCH_ALL);
        let outcome = rule.handle(&ctx, failure);

        emit(rule.name(), &outcome, request);

        Classified {
            envelope: outcome.envelope,
            rule: rule.name(),
            severity: outcome.severity,
        }
    }
}

fn emit(rule: &str, outcome: &Outcome, request: &RequestContext) {
    let envelope = &outcome.envelope;
    let detail = outcome.detail.as_deref();

    match outcome.severity {
        Severity::Warning => tracing::warn!(
            rule,
            trace_id = envelope.trace_id(),
            error_code = envelope.error_code(),
            status = envelope.status().as_u16(),
            method = %request.method,
            path = %request.path,
            detail,
            "{}",
            outcome.summary
        ),
        Severity::Error => tracing::error!(
            rule,
            trace_id = envelope.trace_id(),
            error_code = envelope.error_code(),
            status = envelope.status().as_u16(),
            method = %request.method,
            path = %request.path,
            detail,
            "{}",
            outcome.summary
        ),
    }
}
