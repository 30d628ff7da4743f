use anyhow::{Context, Result};
use clap::Parser;
use record_catalog_server::config::{
    AppConfig, CliConfig, FileConfig, DEFAULT_PORT, DEFAULT_SEARCH_DB_PATH,
    DEFAULT_SEARCH_READ_POOL_SIZE, DEFAULT_SEARCH_TIMEOUT_MS, DEFAULT_TRACKS_CSV_PATH,
};
use record_catalog_server::search::SearchGateway;
use record_catalog_server::{
    run_server, AlbumCatalog, RequestCounter, RequestsLoggingLevel, ServerConfig,
    SqliteSearchGateway, TrackIngestor,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to an optional TOML config file. Its values override the CLI ones.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the headerless CSV file listing tracks (track id, album id, title).
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_TRACKS_CSV_PATH)]
    pub tracks_csv: PathBuf,

    /// Path to the SQLite database holding the `album` table used by artist search.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_SEARCH_DB_PATH)]
    pub search_db: PathBuf,

    /// Maximum time in milliseconds a single artist search may take.
    #[clap(long, default_value_t = DEFAULT_SEARCH_TIMEOUT_MS)]
    pub search_timeout_ms: u64,

    /// Number of pooled read connections to the search database.
    #[clap(long, default_value_t = DEFAULT_SEARCH_READ_POOL_SIZE)]
    pub search_read_pool_size: usize,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            port: self.port,
            logging_level: self.logging_level.clone(),
            tracks_csv_path: self.tracks_csv.clone(),
            search_db_path: self.search_db.clone(),
            search_timeout_ms: self.search_timeout_ms,
            search_read_pool_size: self.search_read_pool_size,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    let catalog = Arc::new(AlbumCatalog::seeded());
    info!("Seeded catalog with {} albums", catalog.len());

    info!("Tracks will be read from {:?}", app_config.tracks_csv_path);
    let track_ingestor = Arc::new(TrackIngestor::from_csv_file(&app_config.tracks_csv_path));

    info!(
        "Artist search uses SQLite database at {:?} (timeout {:?}, {} read connections)",
        app_config.search.db_path, app_config.search.timeout, app_config.search.read_pool_size
    );
    let search_gateway: Arc<dyn SearchGateway> = Arc::new(SqliteSearchGateway::new(
        &app_config.search.db_path,
        app_config.search.read_pool_size,
    ));

    run_server(
        ServerConfig::from(&app_config),
        catalog,
        Arc::new(RequestCounter::new()),
        track_ingestor,
        search_gateway,
    )
    .await
}
