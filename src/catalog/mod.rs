mod album;
mod store;

pub use album::{seed_albums, Album};
pub use store::AlbumCatalog;
