use crate::domain::model::Grid;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can hand back the cutoff grid for a track identifier.
#[async_trait]
pub trait TabularDataSource: Send + Sync {
    async fn fetch_grid(&self, track_id: &str) -> Result<Grid>;
}

#[async_trait]
impl<T: TabularDataSource + ?Sized> TabularDataSource for Box<T> {
    async fn fetch_grid(&self, track_id: &str) -> Result<Grid> {
        (**self).fetch_grid(track_id).await
    }
}

#[async_trait]
impl<T: TabularDataSource + ?Sized> TabularDataSource for Arc<T> {
    async fn fetch_grid(&self, track_id: &str) -> Result<Grid> {
        (**self).fetch_grid(track_id).await
    }
}
