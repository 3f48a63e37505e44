use crate::domain::model::Grid;
use crate::domain::ports::TabularDataSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Short-lived per-track cache in front of another source.
///
/// A zero TTL turns caching off. Failed fetches are never cached.
pub struct CachedSource<S: TabularDataSource> {
    inner: S,
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Grid)>>,
}

impl<S: TabularDataSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[async_trait]
impl<S: TabularDataSource> TabularDataSource for CachedSource<S> {
    async fn fetch_grid(&self, track_id: &str) -> Result<Grid> {
        if !self.is_enabled() {
            return self.inner.fetch_grid(track_id).await;
        }

        {
            let entries = self.entries.lock().await;
            if let Some((stored_at, grid)) = entries.get(track_id) {
                if stored_at.elapsed() < self.ttl {
                    tracing::debug!("Cache hit for '{}'", track_id);
                    return Ok(grid.clone());
                }
            }
        }

        let grid = self.inner.fetch_grid(track_id).await?;
        self.entries
            .lock()
            .await
            .insert(track_id.to_string(), (Instant::now(), grid.clone()));
        Ok(grid)
    }
}
