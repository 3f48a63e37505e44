use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("No usable data for track '{track}': {reason}")]
    DataUnavailable { track: String, reason: String },

    #[error("Track '{track}' not found in data source")]
    TrackNotFound { track: String },

    #[error("Upstream returned {status} for track '{track}': {body}")]
    UpstreamError {
        track: String,
        status: u16,
        body: String,
    },

    #[error("Malformed cell at row {row}, column {column}: '{value}'")]
    ParseError {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FinderError {
    pub fn data_unavailable(track: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            track: track.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure came from the tabular data source rather than local setup.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::DataUnavailable { .. }
                | Self::TrackNotFound { .. }
                | Self::UpstreamError { .. }
                | Self::HttpError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataUnavailable { track, .. } => {
                format!("No cutoff data is available for '{}'", track)
            }
            Self::TrackNotFound { track } => format!("There is no sheet named '{}'", track),
            Self::UpstreamError { status, .. } => {
                format!("The spreadsheet service rejected the request (HTTP {})", status)
            }
            Self::HttpError(_) => "Could not reach the spreadsheet service".to_string(),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => {
                "Check that the sheet exists and has a header row plus at least one region row"
            }
            Self::TrackNotFound { .. } => "Check the subject stream name and the track aliases",
            Self::UpstreamError { status: 401 | 403, .. } => {
                "Check the API key or access token and the sheet's sharing settings"
            }
            Self::UpstreamError { .. } | Self::HttpError(_) => {
                "Check network connectivity and the spreadsheet id, then retry"
            }
            Self::ParseError { .. } => "Fix the cell so it holds a number, NQC, or nothing",
            Self::CsvError(_) | Self::IoError(_) => "Check the data directory and file permissions",
            Self::SerializationError(_) => "Check the upstream response format",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration file and environment",
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
