use anyhow::Context as _;
use faultline_config::I18nConfig;
use faultline_i18n::BundleCatalog;

/// Catalog from the bundle directory, then inline tables on top
///
/// Inline entries replace bundle entries with the same locale and key.
pub(crate) fn from_config(config: &I18nConfig) -> anyhow::Result<BundleCatalog> {
    let mut catalog = BundleCatalog::new(config.locale().context("invalid i18n.default_locale")?);

    if let Some(ref dir) = config.bundles_dir {
        catalog = catalog
            .load_dir(dir)
            .with_context(|| format!("failed to load message bundles from {}", dir.display()))?;
    }

    for (locale, messages) in config.inline_messages().context("invalid i18n.messages table")? {
        catalog = catalog.with_messages(locale, messages.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    tracing::debug!(
        default_locale = %config.default_locale,
        locales = catalog.locales().count(),
        messages = catalog.len(),
        "message catalog loaded"
    );

    Ok(catalog)
}
