//! In-memory album catalog.
//!
//! The catalog is seeded at startup and only ever grows through [`AlbumCatalog::insert`].
//! Nothing is persisted: a restart brings back the seed albums only.

use super::album::{seed_albums, Album};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Insertion-ordered collection of albums shared by all request handlers.
#[derive(Debug, Default)]
pub struct AlbumCatalog {
    albums: RwLock<Vec<Album>>,
}

impl AlbumCatalog {
    pub fn with_albums(albums: Vec<Album>) -> AlbumCatalog {
        AlbumCatalog {
            albums: RwLock::new(albums),
        }
    }

    pub fn seeded() -> AlbumCatalog {
        Self::with_albums(seed_albums())
    }

    // Writers only ever push whole records, so a poisoned lock still guards a
    // consistent vector.
    fn read_guard(&self) -> RwLockReadGuard<'_, Vec<Album>> {
        self.albums.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Vec<Album>> {
        self.albums.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every album, in insertion order.
    pub fn list_all(&self) -> Vec<Album> {
        self.read_guard().clone()
    }

    /// First album with the given id, in insertion order.
    pub fn find_by_id(&self, id: &str) -> Option<Album> {
        self.read_guard().iter().find(|a| a.id == id).cloned()
    }

    /// Appends the album. Ids are not checked for uniqueness.
    pub fn insert(&self, album: Album) {
        let mut albums = self.write_guard();
        debug!("Inserting album {} at position {}", album.id, albums.len());
        albums.push(album);
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }
}
