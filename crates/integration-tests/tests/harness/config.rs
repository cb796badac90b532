//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::PathBuf;

use faultline_config::{Config, HealthConfig, ServerConfig};
use indexmap::IndexMap;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal defaults plus English and German messages for the demo routes
    pub fn new() -> Self {
        let config = Config {
            server: ServerConfig {
                listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                health: HealthConfig {
                    enabled: true,
                    ..HealthConfig::default()
                },
                ..ServerConfig::default()
            },
            ..Config::default()
        };

        Self { config }
            .with_messages(
                "en",
                &[
                    ("error.general.internal", "An internal server error occurred"),
                    ("error.order.not_payable", "Order {0} cannot be paid"),
                    ("error.user.not_found", "User {0} was not found"),
                    ("error.validation.failed", "Validation failed"),
                    ("error.validation.required", "Parameter {0} is required"),
                    ("error.validation.type.mismatch", "Parameter {0} must be of type {1}"),
                    ("error.validation.email", "must be a well-formed email address"),
                    ("error.validation.min", "must be at least {0}"),
                    ("field.email", "Email"),
                    ("field.age", "Age"),
                ],
            )
            .with_messages(
                "de",
                &[
                    ("error.general.internal", "Ein interner Serverfehler ist aufgetreten"),
                    ("error.user.not_found", "Benutzer {0} wurde nicht gefunden"),
                    ("error.validation.failed", "Validierung fehlgeschlagen"),
                    ("error.validation.min", "muss mindestens {0} sein"),
                    ("field.age", "Alter"),
                ],
            )
    }

    /// Add inline messages for `locale`
    pub fn with_messages(mut self, locale: &str, messages: &[(&str, &str)]) -> Self {
        let table = self.config.i18n.messages.entry(locale.to_owned()).or_insert_with(IndexMap::new);
        for (key, template) in messages {
            table.insert((*key).to_owned(), (*template).to_owned());
        }
        self
    }

    /// Drop every inline message
    pub fn without_messages(mut self) -> Self {
        self.config.i18n.messages.clear();
        self
    }

    pub fn with_default_locale(mut self, locale: &str) -> Self {
        self.config.i18n.default_locale = locale.to_owned();
        self
    }

    pub fn with_bundles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.i18n.bundles_dir = Some(dir.into());
        self
    }

    pub fn with_trace_header(mut self, name: &str) -> Self {
        self.config.server.trace_header = name.to_owned();
        self
    }

    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
