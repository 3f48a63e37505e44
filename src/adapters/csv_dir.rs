use crate::domain::model::Grid;
use crate::domain::ports::TabularDataSource;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Offline source: one `{track_id}.csv` file per track in a directory.
///
/// The CSV header line is kept as grid row 0.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    directory: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn track_path(&self, track_id: &str) -> PathBuf {
        self.directory.join(format!("{}.csv", track_id))
    }
}

pub fn parse_csv_grid(data: &[u8]) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Grid::new(rows))
}

#[async_trait]
impl TabularDataSource for CsvDirectorySource {
    async fn fetch_grid(&self, track_id: &str) -> Result<Grid> {
        if track_id.contains(['/', '\\']) || Path::new(track_id).is_absolute() {
            return Err(FinderError::TrackNotFound {
                track: track_id.to_string(),
            });
        }

        let path = self.track_path(track_id);
        tracing::debug!("Reading grid for '{}' from {}", track_id, path.display());

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FinderError::TrackNotFound {
                    track: track_id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        parse_csv_grid(&data)
    }
}
