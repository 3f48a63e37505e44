#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{
    AppConfig, LoggingConfig, RecommendationConfig, ServerConfig, SourceConfig, SourceKind,
};

use crate::adapters::{CachedSource, CsvDirectorySource, GoogleSheetsSource};
use crate::domain::ports::TabularDataSource;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::time::Duration;

/// Build the data source described by `[source]`, wrapped in a cache when a TTL is set.
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn TabularDataSource>> {
    let source: Box<dyn TabularDataSource> = match config.r#type {
        SourceKind::Sheets => {
            let spreadsheet_id =
                validate_required_field("source.spreadsheet_id", &config.spreadsheet_id)?;
            tracing::info!("Using Google Sheets source (spreadsheet {})", spreadsheet_id);
            Box::new(
                GoogleSheetsSource::new(&config.base_url, spreadsheet_id, config.timeout_seconds)?
                    .with_api_key(config.api_key.clone())
                    .with_access_token(config.access_token.clone()),
            )
        }
        SourceKind::Csv => {
            let directory = validate_required_field("source.directory", &config.directory)?;
            tracing::info!("Using CSV directory source at {}", directory);
            Box::new(CsvDirectorySource::new(directory))
        }
    };

    if config.cache_ttl_seconds == 0 {
        return Ok(source);
    }

    tracing::info!("Caching grids for {}s per track", config.cache_ttl_seconds);
    Ok(Box::new(CachedSource::new(
        source,
        Duration::from_secs(config.cache_ttl_seconds),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_csv_source_with_cache() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("BIO.csv"), "Region,A (X)\nKandy,1.0\n").unwrap();

        let config = SourceConfig {
            r#type: SourceKind::Csv,
            directory: Some(dir.path().to_string_lossy().into_owned()),
            cache_ttl_seconds: 30,
            ..SourceConfig::default()
        };

        let source = build_source(&config).unwrap();
        let grid = source.fetch_grid("BIO").await.unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_build_sheets_source_requires_id() {
        let config = SourceConfig::default();
        assert!(build_source(&config).is_err());
    }
}
