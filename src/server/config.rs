use super::RequestsLoggingLevel;
use crate::config::{AppConfig, DEFAULT_PORT, DEFAULT_SEARCH_TIMEOUT_MS};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Upper bound for a single artist search against the relational store.
    pub search_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: DEFAULT_PORT,
            search_timeout: Duration::from_millis(DEFAULT_SEARCH_TIMEOUT_MS),
        }
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        ServerConfig {
            requests_logging_level: config.logging_level.clone(),
            port: config.port,
            search_timeout: config.search.timeout,
        }
    }
}
