//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.awardboard.toml` files.

use crate::error::{FieldErrors, Result as AwardsResult};
use crate::generator::GeneratorConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".awardboard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Synthetic data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// API facade settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// External integration placeholders.
    #[serde(default)]
    pub integrations: IntegrationsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Default output format (text, markdown, json).
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            output_format: default_output_format(),
        }
    }
}

fn default_output_format() -> String {
    "text".to_string()
}

/// Settings for the generated data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Seed for the data generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of users in the directory.
    #[serde(default = "default_users")]
    pub users: usize,

    /// Number of nominations to seed.
    #[serde(default = "default_nominations")]
    pub nominations: usize,

    /// Nominations are dated within this many days before now.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            users: default_users(),
            nominations: default_nominations(),
            history_days: default_history_days(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_users() -> usize {
    50
}

fn default_nominations() -> usize {
    150
}

fn default_history_days() -> u32 {
    90
}

impl From<&DataConfig> for GeneratorConfig {
    fn from(config: &DataConfig) -> Self {
        Self {
            seed: config.seed,
            users: config.users,
            nominations: config.nominations,
            history_days: config.history_days,
        }
    }
}

/// API facade settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Rows per page of the nominations table.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Artificial delay added to every API call, in milliseconds.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            simulated_latency_ms: 0,
        }
    }
}

fn default_page_size() -> usize {
    crate::query::DEFAULT_PAGE_SIZE
}

pub const METRIC_INTERVALS: &[&str] = &["1m", "5m", "15m", "30m"];
pub const RETENTION_PERIODS: &[&str] = &["7d", "30d", "90d", "1y"];

/// Placeholder settings for Slack, Jira, attendance and Prometheus.
///
/// Nothing connects to these systems; the values are only validated
/// and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    #[serde(default)]
    pub slack_token: String,

    #[serde(default)]
    pub jira_url: String,

    #[serde(default)]
    pub jira_username: String,

    #[serde(default)]
    pub jira_api_key: String,

    #[serde(default)]
    pub attendance_system_url: String,

    #[serde(default)]
    pub prometheus_endpoint: String,

    /// Metric collection interval.
    #[serde(default = "default_metric_interval")]
    pub metric_interval: String,

    /// Metric retention period.
    #[serde(default = "default_retention_period")]
    pub retention_period: String,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            slack_token: String::new(),
            jira_url: String::new(),
            jira_username: String::new(),
            jira_api_key: String::new(),
            attendance_system_url: String::new(),
            prometheus_endpoint: String::new(),
            metric_interval: default_metric_interval(),
            retention_period: default_retention_period(),
        }
    }
}

fn default_metric_interval() -> String {
    "5m".to_string()
}

fn default_retention_period() -> String {
    "30d".to_string()
}

impl IntegrationsConfig {
    /// Check URL schemes and the interval/retention choices.
    pub fn validate(&self) -> AwardsResult<()> {
        let mut errors = FieldErrors::default();

        let urls = [
            ("jira_url", &self.jira_url),
            ("attendance_system_url", &self.attendance_system_url),
            ("prometheus_endpoint", &self.prometheus_endpoint),
        ];
        for (field, url) in urls {
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(field, "must start with 'http://' or 'https://'");
            }
        }

        if !METRIC_INTERVALS.contains(&self.metric_interval.as_str()) {
            errors.push(
                "metric_interval",
                format!("must be one of {}", METRIC_INTERVALS.join(", ")),
            );
        }
        if !RETENTION_PERIODS.contains(&self.retention_period.as_str()) {
            errors.push(
                "retention_period",
                format!("must be one of {}", RETENTION_PERIODS.join(", ")),
            );
        }

        errors.into_result()
    }

    /// Copy with tokens and keys masked, safe to log or print.
    pub fn redacted(&self) -> Self {
        Self {
            slack_token: redact(&self.slack_token),
            jira_api_key: redact(&self.jira_api_key),
            ..self.clone()
        }
    }
}

/// Mask a secret, keeping only its last four characters.
pub fn redact(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        String::new()
    } else if count <= 4 {
        "****".to_string()
    } else {
        let tail: String = secret.chars().skip(count - 4).collect();
        format!("****{}", tail)
    }
}

/// Report generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the evidence section in nomination detail reports.
    #[serde(default = "default_true")]
    pub include_evidence: bool,

    /// Maximum departments listed in the dashboard report.
    #[serde(default = "default_top_departments")]
    pub top_departments: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_evidence: true,
            top_departments: default_top_departments(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_top_departments() -> usize {
    6
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.awardboard.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(seed) = args.seed {
            self.data.seed = seed;
        }
        if let Some(count) = args.records {
            self.data.nominations = count;
        }
        if let Some(format) = args.format {
            self.general.output_format = format.as_str().to_string();
        }
        if let Some(latency) = args.latency_ms {
            self.api.simulated_latency_ms = latency;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
