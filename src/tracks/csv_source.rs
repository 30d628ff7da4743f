use super::{IngestError, TrackSource};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads headerless comma-separated rows from a file on disk.
#[derive(Debug, Clone)]
pub struct CsvTrackSource {
    path: PathBuf,
}

impl CsvTrackSource {
    pub fn new(path: impl Into<PathBuf>) -> CsvTrackSource {
        CsvTrackSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackSource for CsvTrackSource {
    fn read_rows(&self) -> Result<Vec<Vec<String>>, IngestError> {
        let file = File::open(&self.path).map_err(|source| IngestError::Open {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| IngestError::Parse {
                path: self.path.clone(),
                source,
            })?;
            rows.push(record.iter().map(str::to_owned).collect());
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }
}
