//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own catalog, counter, tracks file
//! and search database.

use super::constants::*;
use super::fixtures::create_test_data;
use record_catalog_server::search::SearchGateway;
use record_catalog_server::{
    make_app, AlbumCatalog, RequestCounter, RequestsLoggingLevel, ServerConfig,
    SqliteSearchGateway, TrackIngestor,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Tracks file read by `/tracks`, can be rewritten by tests
    #[allow(dead_code)]
    pub tracks_csv_path: PathBuf,

    /// Search database used by the default gateway
    #[allow(dead_code)]
    pub search_db_path: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server backed by the seeded SQLite search database
    pub async fn spawn() -> Self {
        Self::spawn_with(None).await
    }

    /// Spawns a server whose artist search goes through the given gateway
    pub async fn spawn_with_gateway(gateway: Arc<dyn SearchGateway>) -> Self {
        Self::spawn_with(Some(gateway)).await
    }

    async fn spawn_with(gateway: Option<Arc<dyn SearchGateway>>) -> Self {
        let (temp_dir, tracks_csv_path, search_db_path) =
            create_test_data().expect("Failed to create test data");

        let search_gateway: Arc<dyn SearchGateway> = match gateway {
            Some(gateway) => gateway,
            None => Arc::new(SqliteSearchGateway::new(&search_db_path, 2)),
        };

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            search_timeout: Duration::from_millis(SEARCH_TIMEOUT_MS),
        };

        let app = make_app(
            config,
            Arc::new(AlbumCatalog::seeded()),
            Arc::new(RequestCounter::new()),
            Arc::new(TrackIngestor::from_csv_file(&tracks_csv_path)),
            search_gateway,
        );

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            tracks_csv_path,
            search_db_path,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
