//! Track listing built from a delimited tabular file.
//!
//! The file is read again on every [`TrackIngestor::load_tracks`] call, so edits to
//! it are visible on the next request without a restart.

mod csv_source;

pub use csv_source::CsvTrackSource;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or converting track rows.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unable to read input file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse file as CSV for {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Row {row} has {columns} columns, at least 3 are required")]
    MalformedRow { row: usize, columns: usize },
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Track {
    #[serde(rename = "TrackId")]
    pub track_id: String,
    #[serde(rename = "AlbumId")]
    pub album_id: String,
    #[serde(rename = "Title")]
    pub title: String,
}

/// Maps raw rows positionally: column 0 is the track id, 1 the album id, 2 the title.
///
/// Values are passed through as strings. Columns past the third are ignored.
pub fn ingest<R, S>(rows: &[R]) -> Result<Vec<Track>, IngestError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    rows.iter()
        .enumerate()
        .map(|(index, row)| match row.as_ref() {
            [track_id, album_id, title, ..] => Ok(Track {
                track_id: owned(track_id),
                album_id: owned(album_id),
                title: owned(title),
            }),
            short => Err(IngestError::MalformedRow {
                row: index + 1,
                columns: short.len(),
            }),
        })
        .collect()
}

fn owned<S: AsRef<str>>(value: &S) -> String {
    value.as_ref().to_owned()
}

/// Provider of raw tabular rows.
pub trait TrackSource: Send + Sync {
    fn read_rows(&self) -> Result<Vec<Vec<String>>, IngestError>;
}

pub struct TrackIngestor {
    source: Box<dyn TrackSource>,
}

impl TrackIngestor {
    pub fn new(source: Box<dyn TrackSource>) -> TrackIngestor {
        TrackIngestor { source }
    }

    pub fn from_csv_file(path: impl Into<PathBuf>) -> TrackIngestor {
        Self::new(Box::new(CsvTrackSource::new(path)))
    }

    /// Reads the source afresh and converts every row.
    pub fn load_tracks(&self) -> Result<Vec<Track>, IngestError> {
        let rows = self.source.read_rows()?;
        ingest(&rows)
    }
}

impl std::fmt::Debug for TrackIngestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackIngestor").finish_non_exhaustive()
    }
}
