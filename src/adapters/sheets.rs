use crate::domain::model::Grid;
use crate::domain::ports::TabularDataSource;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Reads one sheet (tab) per track from a Google Sheets spreadsheet via the
/// `values.get` endpoint. The tab name is the track identifier.
pub struct GoogleSheetsSource {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl GoogleSheetsSource {
    pub fn new(base_url: &str, spreadsheet_id: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            api_key: None,
            access_token: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token.filter(|t| !t.trim().is_empty());
        self
    }

    fn values_url(&self, track_id: &str) -> Result<Url> {
        let invalid = |reason: String| FinderError::InvalidConfigValueError {
            field: "source.base_url".to_string(),
            value: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("URL cannot be a base".to_string()))?;
            segments.pop_if_empty().extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                track_id,
            ]);
        }

        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }

        Ok(url)
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl TabularDataSource for GoogleSheetsSource {
    async fn fetch_grid(&self, track_id: &str) -> Result<Grid> {
        let url = self.values_url(track_id)?;
        tracing::debug!("Fetching sheet '{}' from {}", track_id, url.path());

        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Sheets API response status for '{}': {}", track_id, status);

        if !status.is_success() {
            let message = upstream_message(&body);
            if status.as_u16() == 400 && message.contains("Unable to parse range") {
                return Err(FinderError::TrackNotFound {
                    track: track_id.to_string(),
                });
            }
            return Err(FinderError::UpstreamError {
                track: track_id.to_string(),
                status: status.as_u16(),
                body: message,
            });
        }

        let range: ValueRange = serde_json::from_str(&body)?;
        let rows: Vec<Vec<String>> = range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();

        Ok(Grid::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_url_encodes_track_and_key() {
        let source = GoogleSheetsSource::new("https://sheets.example.com/", "sheet-123", 5)
            .unwrap()
            .with_api_key(Some("k&y".to_string()));

        let url = source.values_url("Bio Science").unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.example.com/v4/spreadsheets/sheet-123/values/Bio%20Science?key=k%26y"
        );
    }

    #[test]
    fn test_blank_credentials_are_ignored() {
        let source = GoogleSheetsSource::new(DEFAULT_SHEETS_BASE_URL, "id", 5)
            .unwrap()
            .with_api_key(Some("  ".to_string()))
            .with_access_token(Some(String::new()));

        assert!(source.api_key.is_none());
        assert!(source.access_token.is_none());
        assert!(source.values_url("Maths").unwrap().query().is_none());
    }

    #[test]
    fn test_cell_text_stringifies_non_strings() {
        assert_eq!(cell_text(serde_json::json!("1.25")), "1.25");
        assert_eq!(cell_text(serde_json::json!(1.5)), "1.5");
        assert_eq!(cell_text(serde_json::Value::Null), "");
    }

    #[test]
    fn test_upstream_message_prefers_error_message() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(upstream_message(body), "The caller does not have permission");
        assert_eq!(upstream_message(" gateway timeout \n"), "gateway timeout");
    }
}
