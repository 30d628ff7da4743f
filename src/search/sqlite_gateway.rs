//! SQLite-backed artist search.
//!
//! Connections are opened lazily and reused. A connection that fails a query is
//! dropped, so a store that was briefly unavailable is picked up again on the
//! next search without restarting the server.

use super::{escape_like, ArtistAlbum, GatewayError, SearchGateway};
use crate::sqlite_persistence::{SqlType, Table};
use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

pub const ALBUM_TABLE: Table = Table {
    name: "album",
    columns: &[
        crate::sqlite_column!("id", SqlType::Integer, is_primary_key = true),
        crate::sqlite_column!("title", SqlType::Text, non_null = true),
        crate::sqlite_column!("artist", SqlType::Text, non_null = true),
        crate::sqlite_column!("price", SqlType::Real, non_null = true),
    ],
};

const SEARCH_BY_ARTIST_SQL: &str = "SELECT id, title, artist, price FROM album \
     WHERE artist LIKE '%' || ?1 || '%' ESCAPE '\\' ORDER BY id";

type PooledConnection = Arc<Mutex<Option<Connection>>>;

#[derive(Clone, Debug)]
pub struct SqliteSearchGateway {
    db_path: PathBuf,
    read_pool: Vec<PooledConnection>,
    read_index: Arc<AtomicUsize>,
}

impl SqliteSearchGateway {
    /// No I/O happens here: each pooled connection is opened on its first query.
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Self {
        let read_pool = (0..read_pool_size.max(1))
            .map(|_| Arc::new(Mutex::new(None)))
            .collect();
        SqliteSearchGateway {
            db_path: db_path.as_ref().to_path_buf(),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Creates the `album` table if it is missing.
    pub fn create_schema(conn: &Connection) -> anyhow::Result<()> {
        ALBUM_TABLE.create(conn)
    }

    fn next_connection(&self) -> PooledConnection {
        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.read_pool.len();
        self.read_pool[index].clone()
    }
}

fn open_read_connection(db_path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn query_albums_by_artist(conn: &Connection, fragment: &str) -> rusqlite::Result<Vec<ArtistAlbum>> {
    let mut stmt = conn.prepare_cached(SEARCH_BY_ARTIST_SQL)?;
    let albums = stmt
        .query_map(params![escape_like(fragment)], |row| {
            Ok(ArtistAlbum {
                id: row.get(0)?,
                title: row.get(1)?,
                artist: row.get(2)?,
                price: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(albums)
}

fn search_blocking(
    db_path: &Path,
    pooled: &PooledConnection,
    fragment: &str,
) -> Result<Vec<ArtistAlbum>, GatewayError> {
    let mut slot = pooled.lock().unwrap_or_else(PoisonError::into_inner);

    let conn = match slot.take() {
        Some(conn) => conn,
        None => {
            if !db_path.exists() {
                return Err(GatewayError::Unavailable {
                    fragment: fragment.to_owned(),
                    reason: format!("no database at {:?}", db_path),
                });
            }
            let conn = open_read_connection(db_path).map_err(|source| {
                GatewayError::Connection {
                    fragment: fragment.to_owned(),
                    source,
                }
            })?;
            info!("Opened search store connection to {:?}", db_path);
            conn
        }
    };

    match query_albums_by_artist(&conn, fragment) {
        Ok(albums) => {
            *slot = Some(conn);
            Ok(albums)
        }
        Err(source) => {
            warn!("Dropping search store connection after failure: {}", source);
            Err(GatewayError::Query {
                fragment: fragment.to_owned(),
                source,
            })
        }
    }
}

#[async_trait]
impl SearchGateway for SqliteSearchGateway {
    async fn search_by_artist(&self, fragment: &str) -> Result<Vec<ArtistAlbum>, GatewayError> {
        let pooled = self.next_connection();
        let db_path = self.db_path.clone();
        let owned_fragment = fragment.to_owned();

        let albums = tokio::task::spawn_blocking(move || {
            search_blocking(&db_path, &pooled, &owned_fragment)
        })
        .await
        .map_err(|source| GatewayError::Task {
            fragment: fragment.to_owned(),
            source,
        })??;

        debug!("Albums found for {:?}: {}", fragment, albums.len());
        Ok(albums)
    }
}
