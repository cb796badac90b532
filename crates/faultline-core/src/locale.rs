use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Tag could not be parsed as a locale
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid locale tag: `{0}`")]
pub struct InvalidLocale(String);

/// Normalized BCP 47 style language tag (e.g. `en`, `de-CH`, `zh-Hant-TW`)
///
/// Accepts `_` as a separator on input. The language subtag is lowercased,
/// two-letter regions are uppercased and four-letter scripts titlecased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Locale(String);

impl Locale {
    /// # Errors
    ///
    /// Returns [`InvalidLocale`] when the tag is empty or contains a
    /// malformed subtag
    pub fn parse(tag: &str) -> Result<Self, InvalidLocale> {
        let invalid = || InvalidLocale(tag.to_owned());

        let mut normalized = String::with_capacity(tag.len());
        for (index, subtag) in tag.trim().split(['-', '_']).enumerate() {
            if subtag.is_empty() || subtag.len() > 8 || !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(invalid());
            }

            if index == 0 {
                if subtag.len() < 2 || !subtag.bytes().all(|b| b.is_ascii_alphabetic()) {
                    return Err(invalid());
                }
                normalized.push_str(&subtag.to_ascii_lowercase());
                continue;
            }

            normalized.push('-');
            let is_alpha = subtag.bytes().all(|b| b.is_ascii_alphabetic());
            match subtag.len() {
                2 if is_alpha => normalized.push_str(&subtag.to_ascii_uppercase()),
                4 if is_alpha => {
                    let lower = subtag.to_ascii_lowercase();
                    normalized.push_str(&lower[..1].to_ascii_uppercase());
                    normalized.push_str(&lower[1..]);
                }
                _ => normalized.push_str(&subtag.to_ascii_lowercase()),
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Tag with its last subtag removed, `None` for a bare language
    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once('-').map(|(parent, _)| Self(parent.to_owned()))
    }

    /// This locale followed by each of its parents, most specific first
    pub fn lineage(&self) -> Vec<Self> {
        std::iter::successors(Some(self.clone()), Self::parent).collect()
    }

    /// Pick the preferred locale from an `Accept-Language` header value
    ///
    /// The highest quality wins and ties keep header order. Wildcards,
    /// `q=0` entries and unparsable tags are skipped.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut best: Option<(f32, Self)> = None;

        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or_default().trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }

            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            if quality <= 0.0 {
                continue;
            }

            let Ok(locale) = Self::parse(tag) else {
                continue;
            };

            if best.as_ref().is_none_or(|(top, _)| quality > *top) {
                best = Some((quality, locale));
            }
        }

        best.map(|(_, locale)| locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = InvalidLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = InvalidLocale;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
