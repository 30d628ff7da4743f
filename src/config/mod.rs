mod file_config;

pub use file_config::{FileConfig, SearchConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TRACKS_CSV_PATH: &str = "data/tracks.csv";
pub const DEFAULT_SEARCH_DB_PATH: &str = "data/recordings.db";
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_SEARCH_READ_POOL_SIZE: usize = 4;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub tracks_csv_path: PathBuf,
    pub search_db_path: PathBuf,
    pub search_timeout_ms: u64,
    pub search_read_pool_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            port: DEFAULT_PORT,
            logging_level: RequestsLoggingLevel::default(),
            tracks_csv_path: PathBuf::from(DEFAULT_TRACKS_CSV_PATH),
            search_db_path: PathBuf::from(DEFAULT_SEARCH_DB_PATH),
            search_timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
            search_read_pool_size: DEFAULT_SEARCH_READ_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub tracks_csv_path: PathBuf,
    pub search: SearchSettings,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub db_path: PathBuf,
    pub timeout: Duration,
    pub read_pool_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    ///
    /// The tracks file and the search database are not required to exist yet,
    /// problems with them surface on the requests that use them.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {}", s),
            },
            None => cli.logging_level.clone(),
        };

        let tracks_csv_path = file
            .tracks_csv_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.tracks_csv_path.clone());

        let search_file = file.search.unwrap_or_default();
        let db_path = search_file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.search_db_path.clone());
        let timeout_ms = search_file.timeout_ms.unwrap_or(cli.search_timeout_ms);
        let read_pool_size = search_file
            .read_pool_size
            .unwrap_or(cli.search_read_pool_size);

        if timeout_ms == 0 {
            bail!("Search timeout must be greater than 0 ms");
        }
        if read_pool_size == 0 {
            bail!("Search read pool size must be at least 1");
        }

        Ok(Self {
            port,
            logging_level,
            tracks_csv_path,
            search: SearchSettings {
                db_path,
                timeout: Duration::from_millis(timeout_ms),
                read_pool_size,
            },
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
