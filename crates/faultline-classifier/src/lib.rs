//! Ordered failure classification
//!
//! The [`Classifier`] evaluates an explicit list of rules, most specific
//! first, and always ends with a catch-all, so every failure handed to it
//! yields exactly one envelope and exactly one log record.

#![allow(clippy::must_use_candidate)]

mod aggregator;
mod builtin;
mod classifier;
mod rule;

pub use aggregator::{Aggregation, aggregate_field_errors};
pub use classifier::{Classified, Classifier};
pub use rule::{Handler, Matcher, Outcome, Rule, RuleContext, Severity};

#[cfg(test)]
mod capture;
