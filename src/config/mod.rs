#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::{DEFAULT_API_ENDPOINT, DEFAULT_RESOURCE_ID};
use crate::core::generator::{MAX_YEAR, MIN_YEAR};
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::Datelike;
use toml_config::TomlConfig;

/// Resolved run settings: built-in defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_endpoint: String,
    pub resource_id: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub year: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            resource_id: DEFAULT_RESOURCE_ID.to_string(),
            output_path: "./output".to_string(),
            output_formats: vec!["csv".to_string()],
            timeout_seconds: 30,
            retry_attempts: 0,
            retry_delay_ms: 500,
            year: None,
        }
    }
}

impl Settings {
    pub fn apply_toml(&mut self, config: TomlConfig) {
        let TomlConfig {
            source,
            lookup,
            load,
        } = config;

        if let Some(endpoint) = source.endpoint {
            self.api_endpoint = endpoint;
        }
        if let Some(resource_id) = source.resource_id {
            self.resource_id = resource_id;
        }
        if let Some(timeout) = source.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(retries) = source.retry_attempts {
            self.retry_attempts = retries;
        }
        if let Some(delay) = source.retry_delay_ms {
            self.retry_delay_ms = delay;
        }
        if let Some(year) = lookup.year {
            self.year = Some(year);
        }
        if let Some(path) = load.output_path {
            self.output_path = path;
        }
        if let Some(formats) = load.output_formats {
            self.output_formats = formats;
        }
    }

    pub fn formats(&self) -> Result<Vec<OutputFormat>> {
        validation::validate_formats("output_formats", &self.output_formats)
    }

    /// 未指定年份時使用本地的今年
    pub fn year_or_current(&self) -> i32 {
        self.year
            .unwrap_or_else(|| chrono::Local::now().date_naive().year())
    }
}

#[cfg(feature = "cli")]
impl Settings {
    pub fn from_cli(cli: &cli::CliConfig) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            settings.apply_toml(TomlConfig::from_file(path)?);
        }

        // 命令列參數優先
        if let Some(endpoint) = &cli.api_endpoint {
            settings.api_endpoint = endpoint.clone();
        }
        if let Some(resource_id) = &cli.resource_id {
            settings.resource_id = resource_id.clone();
        }
        if let Some(path) = &cli.output_path {
            settings.output_path = path.clone();
        }
        if !cli.formats.is_empty() {
            settings.output_formats = cli.formats.clone();
        }
        if let Some(timeout) = cli.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(retries) = cli.retry_attempts {
            settings.retry_attempts = retries;
        }
        if cli.year.is_some() {
            settings.year = cli.year;
        }

        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("resource_id", &self.resource_id)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        self.formats()?;
        if let Some(year) = self.year {
            validation::validate_range("year", year, MIN_YEAR, MAX_YEAR)?;
        }
        Ok(())
    }
}
