use crate::domain::model::Grid;
use crate::domain::ports::TabularDataSource;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Grids held in memory, keyed by track identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    grids: HashMap<String, Grid>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, track_id: impl Into<String>, grid: Grid) -> Self {
        self.grids.insert(track_id.into(), grid);
        self
    }

    pub fn insert(&mut self, track_id: impl Into<String>, grid: Grid) {
        self.grids.insert(track_id.into(), grid);
    }
}

#[async_trait]
impl TabularDataSource for InMemorySource {
    async fn fetch_grid(&self, track_id: &str) -> Result<Grid> {
        self.grids
            .get(track_id)
            .cloned()
            .ok_or_else(|| FinderError::TrackNotFound {
                track: track_id.to_string(),
            })
    }
}
