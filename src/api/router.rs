use crate::api::handlers::{degree_programs, health, not_found, recommendations};
use crate::config::ServerConfig;
use crate::core::engine::RecommendationEngine;
use crate::domain::ports::TabularDataSource;
use crate::utils::error::{FinderError, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Routes only, no middleware.
pub fn router<S: TabularDataSource + 'static>(engine: Arc<RecommendationEngine<S>>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/degree-programs", get(degree_programs::<S>))
        .route("/api/recommendations", get(recommendations::<S>))
        .fallback(not_found)
        .with_state(engine)
}

/// Routes plus CORS for the configured front end and request tracing.
pub fn build_app<S: TabularDataSource + 'static>(
    engine: Arc<RecommendationEngine<S>>,
    server: &ServerConfig,
) -> Result<Router> {
    let origin = HeaderValue::from_str(server.frontend_url.trim_end_matches('/')).map_err(|e| {
        FinderError::InvalidConfigValueError {
            field: "server.frontend_url".to_string(),
            value: server.frontend_url.clone(),
            reason: e.to_string(),
        }
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Ok(router(engine)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
