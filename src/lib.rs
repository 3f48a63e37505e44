pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CachedSource, CsvDirectorySource, GoogleSheetsSource, InMemorySource};
pub use config::{build_source, AppConfig};
pub use core::engine::{EngineSettings, RecommendationEngine};
pub use domain::model::{Grid, Program, RecommendationRequest, RecommendationSet};
pub use domain::ports::TabularDataSource;
pub use utils::error::{FinderError, Result};
