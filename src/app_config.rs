use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and materializing the ordered translation endpoint list.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation mode (cloud API or self-hosted instance)
    #[serde(default)]
    pub mode: TranslateMode,

    /// API key for the cloud translation endpoint
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Self-hosted translation endpoint URL
    #[serde(default = "default_selfhosted_endpoint")]
    pub selfhosted_endpoint: String,

    /// Data store base URL (Supabase project URL)
    #[serde(default = "String::new")]
    pub store_url: String,

    /// Data store service key
    #[serde(default = "String::new")]
    pub store_service_key: String,

    /// Table holding the translatable listings
    #[serde(default = "default_table")]
    pub table: String,

    /// Source language code of the canonical title/description columns
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes, processed strictly in order
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Maximum number of rows fetched per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Number of concurrent workers per batch
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Minimum interval between outbound translation requests, in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Delay each worker waits after finishing a record, in milliseconds
    #[serde(default = "default_worker_delay_ms")]
    pub worker_delay_ms: u64,

    /// Request timeout for translation endpoints, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation mode selector
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslateMode {
    /// Public cloud endpoint, requires an API key
    #[default]
    Cloud,
    /// Self-hosted instance, checked for reachability at startup
    SelfHosted,
}

impl TranslateMode {
    /// Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Cloud => "cloud".to_string(),
            Self::SelfHosted => "selfhosted".to_string(),
        }
    }
}

impl std::fmt::Display for TranslateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslateMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cloud" => Ok(Self::Cloud),
            "selfhosted" | "self-hosted" => Ok(Self::SelfHosted),
            _ => Err(anyhow!("Invalid translation mode: {}", s)),
        }
    }
}

/// One candidate translation endpoint, tried in list order
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EndpointConfig {
    /// Short name used in logs
    pub name: String,

    /// Full URL of the translate route
    pub url: String,

    /// API key sent with the request body, when required
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_selfhosted_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_table() -> String {
    "properties".to_string()
}

fn default_source_language() -> String {
    "sv".to_string()
}

fn default_target_languages() -> Vec<String> {
    vec![
        "en".to_string(),
        "de".to_string(),
        "fr".to_string(),
        "es".to_string(),
        "ar".to_string(),
        "fa".to_string(),
        "tr".to_string(),
    ]
}

fn default_batch_size() -> usize {
    50
}

fn default_concurrency() -> usize {
    5
}

fn default_min_interval_ms() -> u64 {
    1000
}

fn default_worker_delay_ms() -> u64 {
    100
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cloud_endpoint() -> String {
    "https://libretranslate.com/translate".to_string()
}

/// Public mirrors tried after the primary endpoint fails
fn default_mirror_endpoints() -> Vec<String> {
    vec![
        "https://translate.terraprint.co/translate".to_string(),
        "https://lt.vern.cc/translate".to_string(),
    ]
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.store_url.trim().is_empty() {
            return Err(anyhow!("Store URL is required"));
        }
        url::Url::parse(&self.store_url)
            .map_err(|e| anyhow!("Invalid store URL '{}': {}", self.store_url, e))?;
        if self.store_service_key.trim().is_empty() {
            return Err(anyhow!("Store service key is required"));
        }
        if self.mode == TranslateMode::Cloud && self.api_key.trim().is_empty() {
            return Err(anyhow!("Translation API key is required in cloud mode"));
        }
        if self.batch_size == 0 {
            return Err(anyhow!("Batch size must be greater than zero"));
        }
        if self.concurrency == 0 {
            return Err(anyhow!("Concurrency must be greater than zero"));
        }
        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }

        // Every configured target language must have columns in the table
        for code in &self.target_languages {
            language_utils::require_language(code)?;
        }

        if !language_utils::is_valid_iso_code(&self.source_language) {
            return Err(anyhow!("Invalid source language code: {}", self.source_language));
        }

        Ok(())
    }

    /// Materialize the ordered endpoint list for the selected mode
    ///
    /// The primary endpoint comes first (cloud API or the self-hosted
    /// instance), followed by the public mirrors. The resolver tries them
    /// strictly in this order.
    pub fn endpoints(&self) -> Vec<EndpointConfig> {
        let mut endpoints = Vec::new();

        match self.mode {
            TranslateMode::Cloud => {
                endpoints.push(EndpointConfig {
                    name: "cloud".to_string(),
                    url: default_cloud_endpoint(),
                    api_key: Some(self.api_key.clone()),
                    timeout_secs: self.timeout_secs,
                });
            }
            TranslateMode::SelfHosted => {
                endpoints.push(EndpointConfig {
                    name: "selfhosted".to_string(),
                    url: format!(
                        "{}/translate",
                        self.selfhosted_endpoint.trim_end_matches('/')
                    ),
                    api_key: None,
                    timeout_secs: self.timeout_secs,
                });
            }
        }

        for (idx, url) in default_mirror_endpoints().into_iter().enumerate() {
            endpoints.push(EndpointConfig {
                name: format!("mirror-{}", idx + 1),
                url,
                api_key: None,
                timeout_secs: self.timeout_secs,
            });
        }

        endpoints
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            mode: TranslateMode::default(),
            api_key: String::new(),
            selfhosted_endpoint: default_selfhosted_endpoint(),
            store_url: String::new(),
            store_service_key: String::new(),
            table: default_table(),
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
            min_interval_ms: default_min_interval_ms(),
            worker_delay_ms: default_worker_delay_ms(),
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}
