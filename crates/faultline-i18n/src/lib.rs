//! Locale-aware message resolution
//!
//! A [`MessageCatalog`] owns the raw templates; the [`MessageResolver`] walks
//! the locale fallback chain, renders positional arguments and never fails:
//! a miss yields the key (or a caller-supplied default) instead.

#![allow(clippy::must_use_candidate)]

mod catalog;
mod format;
mod resolver;

pub use catalog::{BundleCatalog, CatalogError, MessageCatalog};
pub use format::{FormatError, format_template};
pub use resolver::MessageResolver;
