use crate::core::catalog::catalog_programs;
use crate::core::scanner::{scan, ScanOptions};
use crate::domain::model::{Program, RecommendationRequest, RecommendationSet};
use crate::domain::ports::TabularDataSource;
use crate::utils::error::{FinderError, Result};
use std::collections::HashMap;

pub const DEFAULT_TRACK_ALIASES: [(&str, &str); 3] = [
    ("Bio Science", "BIO"),
    ("Mathematics", "Maths"),
    ("Technology", "Tech"),
];

pub const DEFAULT_CATALOG_TRACKS: [&str; 3] = ["BIO", "Maths", "Tech"];

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Display label -> grid identifier. Unknown labels pass through.
    pub track_aliases: HashMap<String, String>,
    pub catalog_tracks: Vec<String>,
    pub scan: ScanOptions,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            track_aliases: DEFAULT_TRACK_ALIASES
                .iter()
                .map(|(label, id)| (label.to_string(), id.to_string()))
                .collect(),
            catalog_tracks: DEFAULT_CATALOG_TRACKS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            scan: ScanOptions::default(),
        }
    }
}

impl EngineSettings {
    pub fn resolve_track<'a>(&'a self, label: &'a str) -> &'a str {
        self.track_aliases
            .get(label)
            .map(String::as_str)
            .unwrap_or(label)
    }
}

pub struct RecommendationEngine<S: TabularDataSource> {
    source: S,
    settings: EngineSettings,
}

impl<S: TabularDataSource> RecommendationEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_settings(source, EngineSettings::default())
    }

    pub fn with_settings(source: S, settings: EngineSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Fetch the grid for the request's track and rank what the student qualifies for.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationSet> {
        let track_id = self.settings.resolve_track(&request.track);
        tracing::debug!(
            "Fetching grid '{}' for track '{}' (score {}, region '{}')",
            track_id,
            request.track,
            request.score,
            request.region
        );

        let grid = self.source.fetch_grid(track_id).await?;
        if !grid.is_usable() {
            return Err(FinderError::data_unavailable(
                track_id,
                format!("sheet has {} rows", grid.len()),
            ));
        }

        let (matches, alternates) = scan(
            &grid,
            &request.track,
            request.score,
            &request.region,
            &self.settings.scan,
        )?;

        let set = RecommendationSet::new(matches, alternates);
        tracing::info!(
            "Recommendations for '{}' in '{}': {} matches, {} nearby",
            request.track,
            request.region,
            set.matches.len(),
            set.alternates.len()
        );
        Ok(set)
    }

    /// Every program across the catalog tracks. A track that fails to load is left out.
    pub async fn list_all_programs(&self) -> Vec<Program> {
        let mut programs = Vec::new();

        for track_id in &self.settings.catalog_tracks {
            let grid = match self.source.fetch_grid(track_id).await {
                Ok(grid) => grid,
                Err(e) => {
                    tracing::warn!("Failed to fetch data from sheet {}: {}", track_id, e);
                    continue;
                }
            };

            if !grid.is_usable() {
                tracing::warn!(
                    "Sheet {} has no usable data ({} rows), skipping",
                    track_id,
                    grid.len()
                );
                continue;
            }

            let found = catalog_programs(&grid, track_id);
            tracing::debug!("Sheet {} contributed {} programs", track_id, found.len());
            programs.extend(found);
        }

        programs
    }
}
