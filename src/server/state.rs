use axum::extract::FromRef;

use crate::catalog::AlbumCatalog;
use crate::counter::RequestCounter;
use crate::search::SearchGateway;
use crate::tracks::TrackIngestor;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedAlbumCatalog = Arc<AlbumCatalog>;
pub type GuardedRequestCounter = Arc<RequestCounter>;
pub type GuardedTrackIngestor = Arc<TrackIngestor>;
pub type GuardedSearchGateway = Arc<dyn SearchGateway>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedAlbumCatalog,
    pub counter: GuardedRequestCounter,
    pub track_ingestor: GuardedTrackIngestor,
    pub search_gateway: GuardedSearchGateway,
}

impl FromRef<ServerState> for GuardedAlbumCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedRequestCounter {
    fn from_ref(input: &ServerState) -> Self {
        input.counter.clone()
    }
}

impl FromRef<ServerState> for GuardedTrackIngestor {
    fn from_ref(input: &ServerState) -> Self {
        input.track_ingestor.clone()
    }
}

impl FromRef<ServerState> for GuardedSearchGateway {
    fn from_ref(input: &ServerState) -> Self {
        input.search_gateway.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
