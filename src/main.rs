// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use clap::Parser;

use crate::app_config::{Config, LogLevel, TranslateMode};
use crate::errors::AppError;
use crate::providers::TranslationProvider;
use crate::providers::libre::LibreTranslate;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod language_utils;
mod providers;
mod rate_limit;
mod store;
mod translation;

/// mass-translate - listing translation back-fill
///
/// Batch-translates the title and description of property listings into
/// every configured target language and writes the results back to the
/// data store. Only rows still missing a translation are fetched, so the
/// job can be rerun until the backlog is empty.
#[derive(Parser, Debug)]
#[command(name = "mass-translate")]
#[command(version = "1.0.0")]
#[command(about = "Batch-translate listing text fields into all configured languages")]
#[command(long_about = "mass-translate drains the untranslated listing backlog one language at a \
time: fetch a batch of rows whose target-language title is still null or \
empty, translate title and description through the configured endpoints, \
write the results back, repeat until the batch comes back empty.

Every option can be supplied through its environment variable, so the \
binary can run with no flags at all:

    STORE_URL=https://xyz.supabase.co STORE_SERVICE_KEY=... \\
    TRANSLATE_MODE=cloud TRANSLATE_API_KEY=... mass-translate

MODES:
    cloud       - public cloud API (requires TRANSLATE_API_KEY)
    selfhosted  - self-hosted instance (reachability checked at startup)")]
struct CommandLineOptions {
    /// Data store base URL (Supabase project URL)
    #[arg(long, env = "STORE_URL", default_value = "")]
    store_url: String,

    /// Data store service key
    #[arg(long, env = "STORE_SERVICE_KEY", default_value = "", hide_env_values = true)]
    store_service_key: String,

    /// Table holding the translatable listings
    #[arg(long, env = "STORE_TABLE", default_value = "properties")]
    table: String,

    /// Translation mode: cloud or selfhosted
    #[arg(long, env = "TRANSLATE_MODE", default_value = "cloud")]
    mode: TranslateMode,

    /// API key for the cloud translation endpoint
    #[arg(long, env = "TRANSLATE_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Self-hosted translation endpoint URL
    #[arg(long, env = "TRANSLATE_ENDPOINT", default_value = "http://localhost:5000")]
    selfhosted_endpoint: String,

    /// Source language code of the canonical text columns
    #[arg(long, env = "SOURCE_LANG", default_value = "sv")]
    source_language: String,

    /// Comma-separated target language codes, processed in order
    #[arg(long, env = "TARGET_LANGS", value_delimiter = ',')]
    target_languages: Option<Vec<String>>,

    /// Rows fetched per batch
    #[arg(long, env = "BATCH_SIZE", default_value_t = 50)]
    batch_size: usize,

    /// Concurrent workers per batch
    #[arg(long, env = "CONCURRENCY", default_value_t = 5)]
    concurrency: usize,

    /// Minimum interval between translation requests, in milliseconds
    #[arg(long, env = "MIN_INTERVAL_MS", default_value_t = 1000)]
    min_interval_ms: u64,

    /// Set logging level
    #[arg(short, long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<CliLogLevel>,
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, clap::ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Build the config from the parsed command line
fn build_config(options: &CommandLineOptions) -> Config {
    let mut config = Config {
        mode: options.mode,
        api_key: options.api_key.clone(),
        selfhosted_endpoint: options.selfhosted_endpoint.clone(),
        store_url: options.store_url.clone(),
        store_service_key: options.store_service_key.clone(),
        table: options.table.clone(),
        source_language: options.source_language.clone(),
        batch_size: options.batch_size,
        concurrency: options.concurrency,
        min_interval_ms: options.min_interval_ms,
        ..Config::default()
    };

    if let Some(targets) = &options.target_languages {
        config.target_languages = targets.clone();
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    config
}

/// Verify the self-hosted endpoint is reachable before doing any work
///
/// An unreachable instance is a startup prerequisite failure, reported as
/// a configuration error before any work happens.
async fn check_selfhosted(config: &Config) -> Result<(), AppError> {
    let primary = config
        .endpoints()
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Config("No translation endpoints configured".to_string()))?;

    let client = LibreTranslate::new(&primary);
    client
        .healthcheck()
        .await
        .map_err(|e| AppError::Config(format!("Self-hosted endpoint is not reachable: {}", e)))?;

    info!("Self-hosted endpoint {} is reachable", primary.url);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after the command line is parsed
    CustomLogger::init(LevelFilter::Info).map_err(|e| AppError::Unknown(e.to_string()))?;

    let cli = CommandLineOptions::parse();
    let config = build_config(&cli);

    log::set_max_level(level_filter(&config.log_level));

    // Configuration errors are fatal before any work happens
    config.validate().map_err(|e| {
        AppError::Config(format!("{} (see --help for the environment variables)", e))
    })?;

    if config.mode == TranslateMode::SelfHosted {
        check_selfhosted(&config).await?;
    }

    info!(
        "Starting translation run: mode={}, {} target language(s), batch size {}, concurrency {}",
        config.mode,
        config.target_languages.len(),
        config.batch_size,
        config.concurrency
    );

    let controller = Controller::with_config(config)?;
    let summary = controller.run().await?;

    if !summary.is_clean() {
        warn!(
            "{} language pass(es) aborted on store errors",
            summary.aborted_languages
        );
        return Err(AppError::Aborted(summary.aborted_languages));
    }

    Ok(())
}
