use anyhow::{Context, Result};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{debug, info, warn};

use crate::catalog::{Album, AlbumCatalog};
use crate::counter::RequestCounter;
use crate::search::{search_by_artist_within, ArtistAlbum, SearchGateway};
use crate::tracks::{Track, TrackIngestor};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::*, ApiError, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub albums_count: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        albums_count: state.catalog.len(),
    };
    Json(stats)
}

async fn get_albums(State(catalog): State<GuardedAlbumCatalog>) -> Json<Vec<Album>> {
    Json(catalog.list_all())
}

async fn get_album_by_id(
    State(catalog): State<GuardedAlbumCatalog>,
    Path(id): Path<String>,
) -> Result<Json<Album>, ApiError> {
    catalog
        .find_by_id(&id)
        .map(Json)
        .ok_or(ApiError::AlbumNotFound)
}

/// The body is decoded as JSON whatever the declared content type. Missing
/// fields take their zero value, only malformed JSON or mistyped fields fail.
async fn post_albums(State(catalog): State<GuardedAlbumCatalog>, body: Bytes) -> Response {
    let album: Album = match serde_json::from_slice(&body) {
        Ok(album) => album,
        Err(err) => {
            debug!("Rejected album body: {}", err);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    catalog.insert(album.clone());
    (StatusCode::CREATED, Json(album)).into_response()
}

async fn get_albums_by_name(
    State(gateway): State<GuardedSearchGateway>,
    State(config): State<ServerConfig>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ArtistAlbum>>, ApiError> {
    let albums = search_by_artist_within(gateway.as_ref(), &name, config.search_timeout).await?;
    debug!("Albums found for {:?}: {:?}", name, albums);
    Ok(Json(albums))
}

async fn get_tracks(
    State(track_ingestor): State<GuardedTrackIngestor>,
) -> Result<Json<Vec<Track>>, ApiError> {
    let tracks = tokio::task::spawn_blocking(move || track_ingestor.load_tracks())
        .await
        .map_err(|err| ApiError::Internal(format!("Track loading task failed: {}", err)))??;
    debug!("Loaded {} tracks", tracks.len());
    Ok(Json(tracks))
}

async fn get_counter(State(counter): State<GuardedRequestCounter>) -> Json<u64> {
    counter.increment();
    Json(counter.read())
}

impl ServerState {
    fn new(
        config: ServerConfig,
        catalog: Arc<AlbumCatalog>,
        counter: Arc<RequestCounter>,
        track_ingestor: Arc<TrackIngestor>,
        search_gateway: Arc<dyn SearchGateway>,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            counter,
            track_ingestor,
            search_gateway,
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    catalog: Arc<AlbumCatalog>,
    counter: Arc<RequestCounter>,
    track_ingestor: Arc<TrackIngestor>,
    search_gateway: Arc<dyn SearchGateway>,
) -> Router {
    let state = ServerState::new(config, catalog, counter, track_ingestor, search_gateway);

    Router::new()
        .route("/", get(home))
        .route("/albums", get(get_albums).post(post_albums))
        .route("/albums/{id}", get(get_album_by_id))
        .route("/albumsByName/{name}", get(get_albums_by_name))
        .route("/tracks", get(get_tracks))
        .route("/counter", get(get_counter))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping server..."),
        Err(err) => warn!("Could not listen for shutdown signal: {}", err),
    }
}

pub async fn run_server(
    config: ServerConfig,
    catalog: Arc<AlbumCatalog>,
    counter: Arc<RequestCounter>,
    track_ingestor: Arc<TrackIngestor>,
    search_gateway: Arc<dyn SearchGateway>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog, counter, track_ingestor, search_gateway);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Ready to serve at port {}!", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
