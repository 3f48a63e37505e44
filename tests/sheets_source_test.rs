use httpmock::prelude::*;
use uni_finder::{FinderError, GoogleSheetsSource, TabularDataSource};

fn source(server: &MockServer) -> GoogleSheetsSource {
    GoogleSheetsSource::new(&server.base_url(), "sheet-1", 5)
        .unwrap()
        .with_api_key(Some("test-key".to_string()))
}

#[tokio::test]
async fn test_fetch_grid_reads_values() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-1/values/Maths")
            .query_param("key", "test-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "range": "Maths!A1:C3",
                "majorDimension": "ROWS",
                "values": [
                    ["Region", "A (X)", "B (Y)"],
                    ["Colombo", "1.20", "NQC"],
                    ["Kandy", 1.8]
                ]
            }));
    });

    let grid = source(&server).fetch_grid("Maths").await.unwrap();

    api_mock.assert();
    assert_eq!(grid.len(), 3);
    assert_eq!(grid.header()[1], "A (X)");
    assert_eq!(grid.rows()[2], vec!["Kandy".to_string(), "1.8".to_string()]);
}

#[tokio::test]
async fn test_fetch_grid_without_values_is_empty() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/Tech");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"range": "Tech!A1:Z1000", "majorDimension": "ROWS"}));
    });

    let grid = source(&server).fetch_grid("Tech").await.unwrap();

    api_mock.assert();
    assert!(grid.is_empty());
    assert!(!grid.is_usable());
}

#[tokio::test]
async fn test_fetch_grid_sends_bearer_token() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-1/values/BIO")
            .header("Authorization", "Bearer token-123");
        then.status(200)
            .json_body(serde_json::json!({"values": [["Region"], ["Galle"]]}));
    });

    let source = GoogleSheetsSource::new(&server.base_url(), "sheet-1", 5)
        .unwrap()
        .with_access_token(Some("token-123".to_string()));
    let grid = source.fetch_grid("BIO").await.unwrap();

    api_mock.assert();
    assert_eq!(grid.len(), 2);
}

#[tokio::test]
async fn test_permission_error_is_upstream_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/Maths");
        then.status(403).json_body(serde_json::json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        }));
    });

    let err = source(&server).fetch_grid("Maths").await.unwrap_err();

    api_mock.assert();
    match err {
        FinderError::UpstreamError {
            track,
            status,
            body,
        } => {
            assert_eq!(track, "Maths");
            assert_eq!(status, 403);
            assert_eq!(body, "The caller does not have permission");
        }
        other => panic!("expected UpstreamError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_sheet_is_track_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/Commerce");
        then.status(400).json_body(serde_json::json!({
            "error": {
                "code": 400,
                "message": "Unable to parse range: Commerce",
                "status": "INVALID_ARGUMENT"
            }
        }));
    });

    let err = source(&server).fetch_grid("Commerce").await.unwrap_err();
    assert!(matches!(err, FinderError::TrackNotFound { ref track } if track == "Commerce"));
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/Maths");
        then.status(200).body("<html>not json</html>");
    });

    let err = source(&server).fetch_grid("Maths").await.unwrap_err();
    assert!(matches!(err, FinderError::SerializationError(_)));
}
