use crate::api::response::{ApiReply, ApiResponse};
use crate::core::engine::RecommendationEngine;
use crate::domain::model::{Program, RecommendationRequest, RecommendationSet};
use crate::domain::ports::TabularDataSource;
use crate::utils::error::FinderError;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// Raw `/api/recommendations` query; every field arrives as an optional string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub subject_stream: Option<String>,
    pub zscore: Option<String>,
    pub district: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RecommendationQuery {
    /// Validate the query into a request, or return the 400 message.
    pub fn into_request(self) -> Result<RecommendationRequest, String> {
        let stream = present(&self.subject_stream);
        let zscore = present(&self.zscore);
        let district = present(&self.district);

        let missing: Vec<&str> = [
            ("subjectStream", stream.is_none()),
            ("zscore", zscore.is_none()),
            ("district", district.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(stream), Some(zscore), Some(district)) = (stream, zscore, district) else {
            return Err(format!(
                "Missing required parameters: {}",
                missing.join(", ")
            ));
        };

        let score = match zscore.parse::<f64>() {
            Ok(score) if score.is_finite() => score,
            _ => return Err(format!("Invalid zscore: {}", zscore)),
        };

        Ok(RecommendationRequest {
            track: stream.to_string(),
            score,
            region: district.to_string(),
        })
    }
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        message: "University Finder API is running".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn degree_programs<S: TabularDataSource + 'static>(
    State(engine): State<Arc<RecommendationEngine<S>>>,
) -> ApiReply<Vec<Program>> {
    let programs = engine.list_all_programs().await;
    tracing::info!("Serving {} degree programs", programs.len());
    ApiReply::ok(programs)
}

pub async fn recommendations<S: TabularDataSource + 'static>(
    State(engine): State<Arc<RecommendationEngine<S>>>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> ApiReply<RecommendationSet> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("Unreadable recommendation query: {}", rejection);
            return ApiReply::bad_request(rejection.body_text());
        }
    };

    let request = match query.into_request() {
        Ok(request) => request,
        Err(message) => {
            tracing::debug!("Rejected recommendation query: {}", message);
            return ApiReply::bad_request(message);
        }
    };

    match engine.recommend(&request).await {
        Ok(set) => ApiReply::ok(set),
        Err(e @ FinderError::DataUnavailable { .. }) => {
            tracing::error!("Error getting recommendations: {}", e);
            ApiReply::internal_error("Invalid sheet data")
        }
        Err(e) => {
            tracing::error!(
                "Error getting recommendations: {} ({})",
                e,
                e.recovery_suggestion()
            );
            ApiReply::internal_error(format!("Failed to fetch recommendations: {}", e))
        }
    }
}

pub async fn not_found() -> ApiReply<()> {
    ApiReply(StatusCode::NOT_FOUND, ApiResponse::failure("Not found"))
}
