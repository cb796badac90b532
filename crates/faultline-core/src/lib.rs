//! Shared vocabulary for the faultline error boundary
//!
//! Holds the failure taxonomy, the wire envelope and the small value types
//! (locale, request context, trace tokens) that the resolver, classifier and
//! server crates agree on. Nothing here depends on axum.

#![allow(clippy::must_use_candidate)]

mod context;
mod envelope;
mod error;
mod locale;
mod protocol;
mod taxonomy;
mod text;
pub mod trace;
mod violation;

pub use context::RequestContext;
pub use envelope::{EnvelopeBuilder, ErrorEnvelope};
pub use error::ClassifiedError;
pub use locale::{InvalidLocale, Locale};
pub use protocol::ProtocolError;
pub use taxonomy::{BoxError, ErrorKind, StatusClass, TaxonomyError};
pub use text::{BlankValue, ErrorCode, MessageKey};
pub use violation::{ConstraintViolations, FieldViolation, RawViolation, ViolationTarget};
