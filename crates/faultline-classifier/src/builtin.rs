//! Built-in rules, most specific first

use faultline_core::{
    ClassifiedError, ConstraintViolations, ErrorKind, ProtocolError, TaxonomyError, ViolationTarget, trace::prefix,
};
use http::StatusCode;

use crate::aggregator::{Aggregation, aggregate_field_errors};
use crate::{Outcome, Rule, RuleContext, Severity};

pub const UNCLASSIFIED_CODE: &str = "INTERNAL_SERVER_ERROR";
pub const UNCLASSIFIED_KEY: &str = "error.general.internal";
pub const UNCLASSIFIED_DEFAULT: &str = "An internal server error occurred";

/// Mandatory last rule; matches everything
pub const CATCH_ALL: Rule = Rule::new("unclassified", |_| true, unclassified);

pub const RULES: [Rule; 11] = [
    Rule::new("business", |f| is_taxonomy(f, |k| matches!(k, ErrorKind::Business { .. })), taxonomy),
    Rule::new("technical", |f| is_taxonomy(f, |k| matches!(k, ErrorKind::Technical { .. })), taxonomy),
    Rule::new("validation", |f| is_taxonomy(f, |k| matches!(k, ErrorKind::Validation)), taxonomy),
    Rule::new("not_found", |f| is_taxonomy(f, |k| matches!(k, ErrorKind::NotFound)), taxonomy),
    Rule::new("field_validation", |f| is_constraint(f, ViolationTarget::Body), constraints),
    Rule::new("binding", |f| is_constraint(f, ViolationTarget::Binding), constraints),
    Rule::new(
        "method_not_allowed",
        |f| is_protocol(f, |e| matches!(e, ProtocolError::MethodNotAllowed { .. })),
        protocol,
    ),
    Rule::new(
        "missing_parameter",
        |f| is_protocol(f, |e| matches!(e, ProtocolError::MissingParameter { .. })),
        protocol,
    ),
    Rule::new(
        "type_mismatch",
        |f| is_protocol(f, |e| matches!(e, ProtocolError::TypeMismatch { .. })),
        protocol,
    ),
    Rule::new(
        "malformed_body",
        |f| is_protocol(f, |e| matches!(e, ProtocolError::MalformedBody { .. })),
        protocol,
    ),
    Rule::new(
        "no_route",
        |f| is_protocol(f, |e| matches!(e, ProtocolError::NoRoute { .. })),
        protocol,
    ),
];

fn is_taxonomy(failure: &anyhow::Error, kind: fn(ErrorKind) -> bool) -> bool {
    failure.downcast_ref::<TaxonomyError>().is_some_and(|err| kind(err.kind()))
}

fn is_constraint(failure: &anyhow::Error, target: ViolationTarget) -> bool {
    failure
        .downcast_ref::<ConstraintViolations>()
        .is_some_and(|err| err.target() == target)
}

fn is_protocol(failure: &anyhow::Error, variant: fn(&ProtocolError) -> bool) -> bool {
    failure.downcast_ref::<ProtocolError>().is_some_and(variant)
}

fn taxonomy(ctx: &RuleContext<'_>, failure: &anyhow::Error) -> Outcome {
    let Some(err) = failure.downcast_ref::<TaxonomyError>() else {
        return unclassified(ctx, failure);
    };

    let (trace_prefix, summary) = match err.kind() {
        ErrorKind::Business { .. } => (prefix::BUSINESS, "business failure"),
        ErrorKind::Technical { .. } => (prefix::TECHNICAL, "technical failure"),
        ErrorKind::Validation => (prefix::VALIDATION, "validation failure"),
        ErrorKind::NotFound => (prefix::NOT_FOUND, "resource not found"),
    };

    let message = ctx.resolver().resolve(err.key().as_str(), err.args(), ctx.locale());
    let envelope = ctx
        .envelope(err.code().as_str(), message, err.status_code(), trace_prefix)
        .build();
    let outcome = Outcome::new(envelope, Severity::from(err.status_class()), summary);

    match err.kind() {
        ErrorKind::Business { .. } => outcome.with_detail(format!("{failure:#}")),
        ErrorKind::Technical { .. } => outcome.with_detail(format!("{failure:?}")),
        ErrorKind::Validation | ErrorKind::NotFound => outcome,
    }
}

fn constraints(ctx: &RuleContext<'_>, failure: &anyhow::Error) -> Outcome {
    let Some(err) = failure.downcast_ref::<ConstraintViolations>() else {
        return unclassified(ctx, failure);
    };

    let (trace_prefix, summary) = match err.target() {
        ViolationTarget::Body => (prefix::FIELD_VALIDATION, "validation failed"),
        ViolationTarget::Binding => (prefix::BINDING, "binding failed"),
    };

    let Aggregation { field_errors, dropped } = aggregate_field_errors(ctx.resolver(), err.violations(), ctx.locale());
    let detail = if dropped.is_empty() {
        format!("{} field errors", field_errors.len())
    } else {
        format!(
            "{} field errors, dropped blank entries for: {}",
            field_errors.len(),
            dropped.join(", ")
        )
    };
    let message = ctx.resolver().resolve_or(
        err.message_key(),
        None,
        err.default_message().unwrap_or_else(|| err.message_key()),
        ctx.locale(),
    );

    let envelope = ctx
        .envelope(err.error_code(), message, err.status_code(), trace_prefix)
        .field_errors(field_errors)
        .build();

    Outcome::new(envelope, Severity::Warning, summary).with_detail(detail)
}

fn protocol(ctx: &RuleContext<'_>, failure: &anyhow::Error) -> Outcome {
    let Some(err) = failure.downcast_ref::<ProtocolError>() else {
        return unclassified(ctx, failure);
    };

    let args = err.message_args();
    let message = match err.default_message() {
        Some(default) => ctx
            .resolver()
            .resolve_or(err.message_key(), args.as_deref(), default, ctx.locale()),
        None => ctx.resolver().resolve(err.message_key(), args.as_deref(), ctx.locale()),
    };

    let envelope = ctx
        .envelope(err.error_code(), message, err.status_code(), err.trace_prefix())
        .build();

    Outcome::new(envelope, Severity::Warning, "protocol failure").with_detail(format!("{failure:#}"))
}

fn unclassified(ctx: &RuleContext<'_>, failure: &anyhow::Error) -> Outcome {
    let message = ctx
        .resolver()
        .resolve_or(UNCLASSIFIED_KEY, None, UNCLASSIFIED_DEFAULT, ctx.locale());
    let envelope = ctx
        .envelope(
            UNCLASSIFIED_CODE,
            message,
            StatusCode::INTERNAL_SERVER_ERROR,
            prefix::UNCLASSIFIED,
        )
        .build();

    Outcome::new(envelope, Severity::Error, "unexpected failure").with_detail(format!("{failure:?}"))
}
