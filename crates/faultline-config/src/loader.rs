use std::path::Path;

use anyhow::Context as _;
use http::HeaderName;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML is invalid, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Expand, deserialize and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand(raw).context("config variable expansion failed")?;
        let config: Self = toml::from_str(&expanded).context("failed to parse config")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_i18n()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.path.trim().is_empty() {
            anyhow::bail!("server.health.path must not be blank");
        }
        if !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        let header = &self.server.trace_header;
        if header.trim().is_empty() {
            anyhow::bail!("server.trace_header must not be blank");
        }
        HeaderName::try_from(header.as_str())
            .with_context(|| format!("server.trace_header '{header}' is not a valid header name"))?;

        Ok(())
    }

    fn validate_i18n(&self) -> anyhow::Result<()> {
        if self.i18n.default_locale.trim().is_empty() {
            anyhow::bail!("i18n.default_locale must not be blank");
        }
        self.i18n.locale().context("invalid i18n.default_locale")?;

        for tag in self.i18n.messages.keys() {
            faultline_core::Locale::parse(tag).with_context(|| format!("invalid locale table i18n.messages.{tag}"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::{Config, LogFormat};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.listen_address, None);
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert_eq!(config.server.trace_header, "x-trace-id");
        assert_eq!(config.i18n.default_locale, "en");
        assert!(config.i18n.messages.is_empty());
        assert_eq!(config.telemetry.log_filter, "info");
        assert_eq!(config.telemetry.format, LogFormat::Pretty);
    }

    #[test]
    fn full_file() {
        let config = Config::parse(indoc! {r#"
            [server]
            listen_address = "0.0.0.0:9000"
            trace_header = "x-correlation-id"

            [server.health]
            path = "/livez"

            [i18n]
            default_locale = "de_de"
            bundles_dir = "i18n"

            [i18n.messages.en]
            "error.general.internal" = "Something broke"
            "field.email" = "Email"

            [i18n.messages.fr]
            "field.email" = "Courriel"

            [telemetry]
            log_filter = "faultline=debug"
            format = "json"
        "#})
        .unwrap();

        assert_eq!(config.server.listen_address, Some(std::net::SocketAddr::from(([0, 0, 0, 0], 9000))));
        assert_eq!(config.server.health.path, "/livez");
        assert_eq!(config.i18n.locale().unwrap().as_str(), "de-DE");
        assert_eq!(config.telemetry.format, LogFormat::Json);

        let inline = config.i18n.inline_messages().unwrap();
        let order: Vec<_> = inline.iter().map(|(locale, _)| locale.as_str()).collect();
        assert_eq!(order, ["en", "fr"]);
        let keys: Vec<_> = inline[0].1.keys().map(String::as_str).collect();
        assert_eq!(keys, ["error.general.internal", "field.email"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse("[server]\nport = 80\n").unwrap_err();
        assert!(format!("{err:#}").contains("unknown field `port`"), "{err:#}");
    }

    #[test]
    fn rejects_invalid_settings() {
        let cases = [
            ("[i18n]\ndefault_locale = \"  \"", "i18n.default_locale must not be blank"),
            ("[i18n]\ndefault_locale = \"not a locale\"", "invalid i18n.default_locale"),
            ("[i18n.messages.\"e n\"]\nkey = \"v\"", "invalid locale table i18n.messages.e n"),
            ("[server.health]\npath = \"\"", "server.health.path must not be blank"),
            ("[server.health]\npath = \"health\"", "must start with '/'"),
            ("[server]\ntrace_header = \"\"", "server.trace_header must not be blank"),
            ("[server]\ntrace_header = \"x trace\"", "is not a valid header name"),
        ];

        for (raw, expected) in cases {
            let err = Config::parse(raw).unwrap_err();
            assert!(format!("{err:#}").contains(expected), "{raw}: {err:#}");
        }
    }

    #[test]
    fn env_placeholders_are_expanded_before_parsing() {
        temp_env::with_var("FAULTLINE_TEST_LOCALE", Some("pt-br"), || {
            let config = Config::parse("[i18n]\ndefault_locale = \"{{ env.FAULTLINE_TEST_LOCALE }}\"").unwrap();
            assert_eq!(config.i18n.locale().unwrap().as_str(), "pt-BR");
        });
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("faultline.toml");

        let err = Config::load(&missing).unwrap_err();
        assert!(err.to_string().contains("faultline.toml"));

        std::fs::write(&missing, "[telemetry]\nformat = \"json\"\n").unwrap();
        let config = Config::load(&missing).unwrap();
        assert_eq!(config.telemetry.format, LogFormat::Json);
    }
}
