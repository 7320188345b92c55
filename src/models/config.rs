//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_flights_api_timeout_secs() -> u64 {
    30
}

fn default_visitor_idle_minutes() -> u64 {
    120
}

fn default_max_visitors() -> usize {
    10_000
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Endpoint accepting `POST` search requests.
    pub flights_api_url: String,
    #[serde(default = "default_flights_api_timeout_secs")]
    pub flights_api_timeout_secs: u64,
    /// Visitor state is dropped after this long without activity.
    #[serde(default = "default_visitor_idle_minutes")]
    pub visitor_idle_minutes: u64,
    #[serde(default = "default_max_visitors")]
    pub max_visitors: usize,
}
