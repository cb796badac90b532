use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

pub const DEFAULT_TRACE_HEADER: &str = "x-trace-id";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    /// Response header echoing the envelope trace token
    #[serde(default = "default_trace_header")]
    pub trace_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            health: HealthConfig::default(),
            trace_header: default_trace_header(),
        }
    }
}

fn default_trace_header() -> String {
    DEFAULT_TRACE_HEADER.to_string()
}
