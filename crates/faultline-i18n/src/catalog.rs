use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use faultline_core::{InvalidLocale, Locale};

/// Failure to load or read message templates
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read message bundle {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse message bundle {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("message bundle {} is not named after a locale", path.display())]
    BundleName {
        path: PathBuf,
        #[source]
        source: InvalidLocale,
    },

    #[error("message `{key}` in {} must be a string", path.display())]
    NotText { path: PathBuf, key: String },

    /// Backing store could not answer the lookup
    #[error("message catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only store of message templates keyed by locale
///
/// Implementations answer exact-locale lookups only; the resolver owns the
/// fallback policy across parent locales and the catalog default.
pub trait MessageCatalog: Send + Sync {
    /// Raw template for `key` in exactly `locale`
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the backing store cannot be queried
    fn lookup(&self, key: &str, locale: &Locale) -> Result<Option<Cow<'_, str>>, CatalogError>;

    /// Locale consulted after the requested locale's lineage is exhausted
    fn default_locale(&self) -> Option<&Locale> {
        None
    }
}

/// In-memory catalog built from TOML bundles or inline tables
#[derive(Debug, Clone)]
pub struct BundleCatalog {
    default_locale: Locale,
    bundles: HashMap<Locale, HashMap<String, String>>,
}

impl BundleCatalog {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            bundles: HashMap::new(),
        }
    }

    /// Add or replace a single template
    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, template: impl Into<String>) {
        self.bundles.entry(locale).or_default().insert(key.into(), template.into());
    }

    /// Add several templates for one locale
    #[must_use]
    pub fn with_messages<I, K, V>(mut self, locale: Locale, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let bundle = self.bundles.entry(locale).or_default();
        bundle.extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Load every `<locale>.toml` file in `dir`
    ///
    /// Nested tables are flattened into dotted keys, so `[http]` with
    /// `404 = "Not Found"` yields `http.404`. Files with other extensions are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the directory or a bundle cannot be read,
    /// a file name is not a locale tag, or a value is not a string
    pub fn load_dir(mut self, dir: &Path) -> Result<Self, CatalogError> {
        let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            self.load_file(&path)?;
        }

        tracing::debug!(
            dir = %dir.display(),
            locales = self.bundles.len(),
            "loaded message bundles"
        );

        Ok(self)
    }

    fn load_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let locale = Locale::parse(stem).map_err(|source| CatalogError::BundleName {
            path: path.to_path_buf(),
            source,
        })?;

        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table: toml::Table = toml::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut flat = Vec::new();
        flatten(path, "", &table, &mut flat)?;

        self.bundles.entry(locale).or_default().extend(flat);
        Ok(())
    }

    /// Locales with at least one template
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.bundles.keys()
    }

    pub fn len(&self) -> usize {
        self.bundles.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn flatten(path: &Path, prefix: &str, table: &toml::Table, out: &mut Vec<(String, String)>) -> Result<(), CatalogError> {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            toml::Value::String(text) => out.push((full_key, text.clone())),
            toml::Value::Table(nested) => flatten(path, &full_key, nested, out)?,
            _ => {
                return Err(CatalogError::NotText {
                    path: path.to_path_buf(),
                    key: full_key,
                });
            }
        }
    }
    Ok(())
}

impl MessageCatalog for BundleCatalog {
    fn lookup(&self, key: &str, locale: &Locale) -> Result<Option<Cow<'_, str>>, CatalogError> {
        Ok(self
            .bundles
            .get(locale)
            .and_then(|bundle| bundle.get(key))
            .map(|template| Cow::Borrowed(template.as_str())))
    }

    fn default_locale(&self) -> Option<&Locale> {
        Some(&self.default_locale)
    }
}
