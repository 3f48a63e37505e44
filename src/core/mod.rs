pub mod catalog;
pub mod engine;
pub mod header;
pub mod scanner;

pub use crate::domain::model::{Grid, Program, RecommendationRequest, RecommendationSet};
pub use crate::domain::ports::TabularDataSource;
pub use crate::utils::error::Result;
