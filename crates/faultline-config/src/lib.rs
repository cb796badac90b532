#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
pub mod i18n;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use health::*;
pub use i18n::*;
pub use server::*;
pub use telemetry::*;

/// Top-level faultline configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener, health endpoint and response header settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Message catalog settings
    #[serde(default)]
    pub i18n: I18nConfig,
    /// Log output settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
