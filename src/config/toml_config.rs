use crate::adapters::sheets::{DEFAULT_SHEETS_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::engine::EngineSettings;
use crate::core::scanner::ScanOptions;
use crate::domain::model::AlternateSelection;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub frontend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3001,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sheets,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub r#type: SourceKind,
    pub base_url: String,
    pub spreadsheet_id: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub timeout_seconds: u64,
    pub cache_ttl_seconds: u64,
    pub directory: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            r#type: SourceKind::Sheets,
            base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            spreadsheet_id: None,
            api_key: None,
            access_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            cache_ttl_seconds: 0,
            directory: None,
        }
    }
}

impl SourceConfig {
    /// Optional values whose `${VAR}` placeholder had no value in the environment are unset.
    fn clear_unresolved_placeholders(&mut self) {
        let fields = [
            ("source.spreadsheet_id", &mut self.spreadsheet_id),
            ("source.api_key", &mut self.api_key),
            ("source.access_token", &mut self.access_token),
            ("source.directory", &mut self.directory),
        ];

        for (field, value) in fields {
            if value.as_deref().is_some_and(|v| ENV_PLACEHOLDER.is_match(v)) {
                tracing::warn!("{} references an unset environment variable, ignoring it", field);
                *value = None;
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub track_aliases: HashMap<String, String>,
    pub catalog_tracks: Vec<String>,
    pub alternate_regions: Vec<String>,
    pub alternate_limit: usize,
    pub alternate_selection: AlternateSelection,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            track_aliases: settings.track_aliases,
            catalog_tracks: settings.catalog_tracks,
            alternate_regions: settings.scan.alternate_regions,
            alternate_limit: settings.scan.alternate_limit,
            alternate_selection: settings.scan.alternate_selection,
        }
    }
}

impl RecommendationConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            track_aliases: self.track_aliases.clone(),
            catalog_tracks: self.catalog_tracks.clone(),
            scan: ScanOptions {
                alternate_regions: self.alternate_regions.clone(),
                alternate_limit: self.alternate_limit,
                alternate_selection: self.alternate_selection,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| FinderError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.source.clear_unresolved_placeholders();
        Ok(config)
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay as written
    /// and are cleared from the source settings after parsing.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Build a configuration from process environment variables only.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = env::var("PORT") {
            config.server.port = port.trim().parse().map_err(|_| {
                FinderError::InvalidConfigValueError {
                    field: "PORT".to_string(),
                    value: port.clone(),
                    reason: "Must be a port number".to_string(),
                }
            })?;
        }
        if let Ok(bind) = env::var("BIND_ADDRESS") {
            config.server.bind = bind;
        }
        if let Ok(frontend_url) = env::var("FRONTEND_URL") {
            config.server.frontend_url = frontend_url;
        }

        config.source.spreadsheet_id = env::var("SHEET_ID").ok();
        config.source.api_key = env::var("GOOGLE_API_KEY").ok();
        config.source.access_token = env::var("GOOGLE_ACCESS_TOKEN").ok();
        if let Ok(base_url) = env::var("SHEETS_BASE_URL") {
            config.source.base_url = base_url;
        }
        if let Ok(directory) = env::var("DATA_DIR") {
            config.source.r#type = SourceKind::Csv;
            config.source.directory = Some(directory);
        }
        if let Ok(ttl) = env::var("CACHE_TTL_SECONDS") {
            config.source.cache_ttl_seconds = ttl.trim().parse().map_err(|_| {
                FinderError::InvalidConfigValueError {
                    field: "CACHE_TTL_SECONDS".to_string(),
                    value: ttl.clone(),
                    reason: "Must be a whole number of seconds".to_string(),
                }
            })?;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.bind", &self.server.bind)?;
        validation::validate_positive_number("server.port", self.server.port.into(), 1)?;
        validation::validate_url("server.frontend_url", &self.server.frontend_url)?;

        match self.source.r#type {
            SourceKind::Sheets => {
                validation::validate_url("source.base_url", &self.source.base_url)?;
                let id = validation::validate_required_field(
                    "source.spreadsheet_id",
                    &self.source.spreadsheet_id,
                )?;
                validation::validate_non_empty_string("source.spreadsheet_id", id)?;
                validation::validate_positive_number(
                    "source.timeout_seconds",
                    self.source.timeout_seconds,
                    1,
                )?;
            }
            SourceKind::Csv => {
                let directory =
                    validation::validate_required_field("source.directory", &self.source.directory)?;
                validation::validate_path("source.directory", directory)?;
            }
        }

        let recommendations = &self.recommendations;
        validation::validate_positive_number(
            "recommendations.alternate_limit",
            recommendations.alternate_limit as u64,
            1,
        )?;
        validation::validate_non_empty_list(
            "recommendations.alternate_regions",
            &recommendations.alternate_regions,
        )?;
        validation::validate_non_empty_list(
            "recommendations.catalog_tracks",
            &recommendations.catalog_tracks,
        )?;

        Ok(())
    }
}
