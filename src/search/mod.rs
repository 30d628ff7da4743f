//! Artist search against the relational album store.

mod sqlite_gateway;

pub use sqlite_gateway::{SqliteSearchGateway, ALBUM_TABLE};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// An album row as stored in the relational store.
///
/// Kept distinct from [`crate::catalog::Album`]: the store uses integer ids and
/// single precision prices, and neither is converted into the other's shape.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ArtistAlbum {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Price")]
    pub price: f32,
}

/// Failure of a single artist search. Every variant keeps the requested fragment.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("albums by artist {fragment:?}: store is unavailable: {reason}")]
    Unavailable { fragment: String, reason: String },

    #[error("albums by artist {fragment:?}: could not connect: {source}")]
    Connection {
        fragment: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("albums by artist {fragment:?}: {source}")]
    Query {
        fragment: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("albums by artist {fragment:?}: query task failed: {source}")]
    Task {
        fragment: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("albums by artist {fragment:?}: no answer within {timeout:?}")]
    TimedOut { fragment: String, timeout: Duration },
}

impl GatewayError {
    pub fn fragment(&self) -> &str {
        match self {
            GatewayError::Unavailable { fragment, .. }
            | GatewayError::Connection { fragment, .. }
            | GatewayError::Query { fragment, .. }
            | GatewayError::Task { fragment, .. }
            | GatewayError::TimedOut { fragment, .. } => fragment,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::TimedOut { .. })
    }
}

#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// All albums whose artist contains `fragment`. The empty fragment matches every album.
    ///
    /// No match is an empty vector, not an error.
    async fn search_by_artist(&self, fragment: &str) -> Result<Vec<ArtistAlbum>, GatewayError>;
}

/// Runs the search, giving up once `timeout` has elapsed.
pub async fn search_by_artist_within(
    gateway: &dyn SearchGateway,
    fragment: &str,
    timeout: Duration,
) -> Result<Vec<ArtistAlbum>, GatewayError> {
    match tokio::time::timeout(timeout, gateway.search_by_artist(fragment)).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::TimedOut {
            fragment: fragment.to_owned(),
            timeout,
        }),
    }
}

/// Escapes `LIKE` pattern characters so the fragment only ever matches literally.
///
/// Meant for patterns declared with `ESCAPE '\'`.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
