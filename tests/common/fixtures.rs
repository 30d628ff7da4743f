//! Test fixture creation for the tracks file and the search database

use super::constants::*;
use anyhow::Result;
use record_catalog_server::SqliteSearchGateway;
use rusqlite::{params, Connection};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory with `tracks.csv` and a seeded `recordings.db`.
/// Returns (temp_dir, tracks_csv_path, search_db_path)
pub fn create_test_data() -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = TempDir::new()?;

    let tracks_csv_path = dir.path().join("tracks.csv");
    fs::write(&tracks_csv_path, TRACKS_CSV)?;

    let search_db_path = dir.path().join("recordings.db");
    let conn = Connection::open(&search_db_path)?;
    SqliteSearchGateway::create_schema(&conn)?;
    for (id, title, artist, price) in STORE_ALBUMS {
        conn.execute(
            "INSERT INTO album (id, title, artist, price) VALUES (?1, ?2, ?3, ?4)",
            params![id, title, artist, price],
        )?;
    }

    Ok((dir, tracks_csv_path, search_db_path))
}
