use std::path::PathBuf;

use faultline_core::{InvalidLocale, Locale};
use indexmap::IndexMap;
use serde::Deserialize;

/// Message catalog configuration
///
/// Inline messages are keyed by locale tag, then by message key:
///
/// ```toml
/// [i18n.messages.de]
/// "error.general.internal" = "Ein interner Serverfehler ist aufgetreten"
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct I18nConfig {
    /// Locale used when a request names none and as the last fallback tier
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Directory of `<locale>.toml` bundles
    #[serde(default)]
    pub bundles_dir: Option<PathBuf>,
    #[serde(default)]
    pub messages: IndexMap<String, IndexMap<String, String>>,
}

impl I18nConfig {
    /// Parsed default locale
    ///
    /// # Errors
    ///
    /// Returns an error if the configured tag is not a valid locale
    pub fn locale(&self) -> Result<Locale, InvalidLocale> {
        Locale::parse(&self.default_locale)
    }

    /// Inline messages with parsed locale tags, in declaration order
    ///
    /// # Errors
    ///
    /// Returns an error on the first table whose name is not a valid locale
    pub fn inline_messages(&self) -> Result<Vec<(Locale, &IndexMap<String, String>)>, InvalidLocale> {
        self.messages
            .iter()
            .map(|(tag, messages)| Ok((Locale::parse(tag)?, messages)))
            .collect()
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            bundles_dir: None,
            messages: IndexMap::new(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}
