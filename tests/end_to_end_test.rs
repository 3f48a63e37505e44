use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use uni_finder::config::{AppConfig, SourceKind};
use uni_finder::{api, build_source, RecommendationEngine, RecommendationRequest};

const REFERENCE_SHEET: &str = r#"{
    "range": "Maths!A1:C3",
    "majorDimension": "ROWS",
    "values": [
        ["Region", "A (X)", "B (Y)"],
        ["Colombo", "1.20", "NQC"],
        ["Kandy", "1.80", "1.50"]
    ]
}"#;

fn sheets_config(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.source.base_url = server.base_url();
    config.source.spreadsheet_id = Some("sheet-1".to_string());
    config.source.api_key = Some("key".to_string());
    config
}

#[tokio::test]
async fn test_reference_example_through_sheets_api() {
    let server = MockServer::start();
    let sheet_mock = server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/Maths");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(REFERENCE_SHEET);
    });

    let config = sheets_config(&server);
    let source = build_source(&config.source).unwrap();
    let engine = RecommendationEngine::with_settings(source, config.recommendations.engine_settings());

    let at_cutoff = engine
        .recommend(&RecommendationRequest {
            track: "Mathematics".to_string(),
            score: 1.50,
            region: "Colombo".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(at_cutoff.matches.len(), 1);
    assert_eq!(at_cutoff.matches[0].program_name, "A");
    assert_eq!(at_cutoff.matches[0].region, "Colombo");
    assert_eq!(at_cutoff.matches[0].historical_threshold, 1.20);
    // A@Kandy needs 1.80, so only B@Kandy qualifies at 1.50
    assert_eq!(at_cutoff.alternates.len(), 1);
    assert_eq!(at_cutoff.alternates[0].program_name, "B");
    assert_eq!(at_cutoff.total_count, 2);

    let higher = engine
        .recommend(&RecommendationRequest {
            track: "Mathematics".to_string(),
            score: 1.80,
            region: "Colombo".to_string(),
        })
        .await
        .unwrap();

    let alternates: Vec<(&str, &str, f64)> = higher
        .alternates
        .iter()
        .map(|p| {
            (
                p.program_name.as_str(),
                p.region.as_str(),
                p.historical_threshold,
            )
        })
        .collect();
    assert_eq!(alternates, vec![("A", "Kandy", 1.80), ("B", "Kandy", 1.50)]);
    assert_eq!(higher.total_count, 3);

    // no cache configured: every request goes upstream
    sheet_mock.assert_hits(2);
}

#[tokio::test]
async fn test_cached_source_fetches_once() {
    let server = MockServer::start();
    let sheet_mock = server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/Maths");
        then.status(200).body(REFERENCE_SHEET);
    });

    let mut config = sheets_config(&server);
    config.source.cache_ttl_seconds = 300;
    let engine = RecommendationEngine::new(build_source(&config.source).unwrap());

    let request = RecommendationRequest {
        track: "Maths".to_string(),
        score: 2.0,
        region: "Kandy".to_string(),
    };
    engine.recommend(&request).await.unwrap();
    engine.recommend(&request).await.unwrap();

    sheet_mock.assert_hits(1);
}

#[tokio::test]
async fn test_upstream_outage_through_http_api() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/BIO");
        then.status(503).body("backend unavailable");
    });

    let config = sheets_config(&server);
    let engine = Arc::new(RecommendationEngine::new(build_source(&config.source).unwrap()));
    let app = api::build_app(engine, &config.server).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recommendations?subjectStream=Bio%20Science&zscore=1.2&district=Galle")
                .header("Origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to fetch recommendations:"));
    assert!(error.contains("503"));
}

#[tokio::test]
async fn test_csv_directory_catalog() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("BIO.csv"),
        "Region,Medicine (University of Colombo),Dental Surgery (University of Peradeniya)\nColombo,2.05,NQC\nKandy,,1.98\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("Maths.csv"), "Region\n").unwrap();

    let mut config = AppConfig::default();
    config.source.r#type = SourceKind::Csv;
    config.source.directory = Some(dir.path().to_string_lossy().into_owned());

    let engine = RecommendationEngine::new(build_source(&config.source).unwrap());
    let programs = engine.list_all_programs().await;

    let ids: Vec<&str> = programs.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["BIO-1-1", "BIO-2-2"]);
    assert_eq!(programs[1].institution, "University of Peradeniya");
    assert_eq!(programs[1].region, "Kandy");
}
