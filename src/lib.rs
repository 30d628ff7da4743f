//! Record Catalog Server Library
//!
//! This library exposes the internal modules for testing and the binaries.

pub mod catalog;
pub mod config;
pub mod counter;
pub mod search;
pub mod server;
pub mod sqlite_persistence;
pub mod tracks;

// Re-export commonly used types for convenience
pub use catalog::{Album, AlbumCatalog};
pub use counter::RequestCounter;
pub use search::{ArtistAlbum, GatewayError, SearchGateway, SqliteSearchGateway};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use tracks::{IngestError, Track, TrackIngestor};
