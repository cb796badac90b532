use std::fmt;
use std::sync::Arc;

use faultline_core::Locale;
use serde_json::Value;

use crate::{MessageCatalog, format_template};

/// Resolves catalog keys into localized text
///
/// Lookup order for a request in `de-CH`: `de-CH`, `de`, then the catalog's
/// default locale and its parents. Resolution never fails; on a miss, a
/// catalog error or a broken template the caller's fallback is returned.
#[derive(Clone)]
pub struct MessageResolver {
    catalog: Arc<dyn MessageCatalog>,
}

impl fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageResolver")
            .field("default_locale", &self.catalog.default_locale())
            .finish_non_exhaustive()
    }
}

impl MessageResolver {
    pub fn new(catalog: impl MessageCatalog + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn from_shared(catalog: Arc<dyn MessageCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve `key`, returning the key itself when no text is available
    pub fn resolve(&self, key: &str, args: Option<&[Value]>, locale: &Locale) -> String {
        self.lookup(key, args, locale).unwrap_or_else(|| key.to_owned())
    }

    /// Resolve `key`, returning `default_message` when no text is available
    pub fn resolve_or(&self, key: &str, args: Option<&[Value]>, default_message: &str, locale: &Locale) -> String {
        self.lookup(key, args, locale)
            .unwrap_or_else(|| default_message.to_owned())
    }

    fn lookup(&self, key: &str, args: Option<&[Value]>, locale: &Locale) -> Option<String> {
        for candidate in self.candidates(locale) {
            let template = match self.catalog.lookup(key, &candidate) {
                Ok(Some(template)) => template,
                Ok(None) => continue,
                Err(error) => {
                    tracing::debug!(key, locale = %candidate, %error, "message lookup failed");
                    return None;
                }
            };

            return match format_template(&template, args.unwrap_or_default()) {
                Ok(text) => Some(text),
                Err(error) => {
                    tracing::debug!(key, locale = %candidate, %error, "message template is malformed");
                    None
                }
            };
        }

        tracing::debug!(key, %locale, "no message found");
        None
    }

    fn candidates(&self, locale: &Locale) -> Vec<Locale> {
        let mut chain = locale.lineage();
        if let Some(default) = self.catalog.default_locale() {
            for fallback in default.lineage() {
                if !chain.contains(&fallback) {
                    chain.push(fallback);
                }
            }
        }
        chain
    }
}
