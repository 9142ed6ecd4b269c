use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::language_utils;
use crate::providers::TranslationProvider;
use crate::providers::libre::LibreTranslate;
use crate::rate_limit::RateLimiter;
use crate::store::{ListingStore, supabase::SupabaseStore};
use crate::translation::{BatchOutcome, EndpointResolver, WorkerPool};

// @module: Application controller for the mass-translation run

/// Summary of a full run across all configured languages
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Combined counters across every batch of every language
    pub totals: BatchOutcome,
    /// Language passes aborted by a batch-fetch failure
    pub aborted_languages: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunSummary {
    /// Whether every language pass drained without a fetch failure
    pub fn is_clean(&self) -> bool {
        self.aborted_languages == 0
    }
}

/// Main application controller for the translation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
    store: Arc<dyn ListingStore>,
    pool: WorkerPool,
}

impl Controller {
    // @method: Create a controller wired to the production store and endpoints
    pub fn with_config(config: Config) -> Result<Self> {
        let store: Arc<dyn ListingStore> = Arc::new(SupabaseStore::new(
            config.store_url.clone(),
            config.store_service_key.clone(),
            config.table.clone(),
        ));

        let endpoints: Vec<Arc<dyn TranslationProvider>> = config
            .endpoints()
            .iter()
            .map(|e| Arc::new(LibreTranslate::new(e)) as Arc<dyn TranslationProvider>)
            .collect();

        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(
            config.min_interval_ms,
        )));
        let resolver = Arc::new(EndpointResolver::new(endpoints, limiter));

        Ok(Self::with_parts(config, store, resolver))
    }

    /// Create a controller over explicit collaborators
    ///
    /// Used by tests to run the full pipeline against doubles.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn ListingStore>,
        resolver: Arc<EndpointResolver>,
    ) -> Self {
        let pool = WorkerPool::new(
            resolver,
            store.clone(),
            config.concurrency,
            Duration::from_millis(config.worker_delay_ms),
        );
        Self { config, store, pool }
    }

    /// Run the full pipeline: drain every configured language in order
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::default();

        for code in &self.config.target_languages {
            // Validated at startup, so a miss here is a programming error
            let language = language_utils::require_language(code)?;

            info!(
                "Starting language pass: {} ({})",
                language.name(),
                language.code
            );

            let outcome = self.drain_language(language).await;
            match outcome {
                Ok(language_totals) => {
                    info!(
                        "Finished {}: {} processed, {} failed, {} skipped, {} degraded",
                        language.name(),
                        language_totals.processed,
                        language_totals.failed,
                        language_totals.skipped,
                        language_totals.degraded
                    );
                    summary.totals.merge(&language_totals);
                }
                Err((language_totals, e)) => {
                    // A fetch failure aborts this pass only; remaining
                    // languages still get their turn
                    error!("Language pass {} aborted: {}", language.name(), e);
                    summary.totals.merge(&language_totals);
                    summary.aborted_languages += 1;
                }
            }
        }

        summary.elapsed = start_time.elapsed();

        info!(
            "Run complete in {:.1?}: {} processed, {} failed, {} skipped, {} degraded across {} languages ({} aborted)",
            summary.elapsed,
            summary.totals.processed,
            summary.totals.failed,
            summary.totals.skipped,
            summary.totals.degraded,
            self.config.target_languages.len(),
            summary.aborted_languages
        );

        Ok(summary)
    }

    /// Repeat fetch + drain for one language until the backlog is empty
    ///
    /// On a fetch failure, returns the counters accumulated so far along
    /// with the error so the caller can report partial progress.
    async fn drain_language(
        &self,
        language: &'static language_utils::Language,
    ) -> Result<BatchOutcome, (BatchOutcome, crate::errors::StoreError)> {
        let mut totals = BatchOutcome::default();
        let mut batch_index = 0usize;
        // Rows already seen this pass that did not leave the fetch
        // predicate (blank sources, degraded translations, rejected
        // writes). They sit at the front of the predicate's stable order,
        // so fetching past them reaches rows not yet attempted instead of
        // looping on the same page
        let mut stuck_rows = 0usize;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{}: fetching backlog", language.name()));

        loop {
            let batch = match self
                .store
                .fetch_untranslated(language, self.config.batch_size, stuck_rows)
                .await
            {
                Ok(batch) => batch,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err((totals, e));
                }
            };

            if batch.is_empty() {
                spinner.finish_and_clear();
                return Ok(totals);
            }

            batch_index += 1;
            let batch_len = batch.len();
            spinner.set_message(format!(
                "{}: batch {} ({} listings)",
                language.name(),
                batch_index,
                batch_len
            ));

            let outcome = self
                .pool
                .run_batch(batch, language, &self.config.source_language)
                .await;

            info!(
                "Batch {} ({} listings): {} processed, {} failed, {} skipped, {} degraded",
                batch_index,
                batch_len,
                outcome.processed,
                outcome.failed,
                outcome.skipped,
                outcome.degraded
            );
            totals.merge(&outcome);

            // Everything in this batch that was not written stays in the
            // predicate; skip past it on the next fetch. The pass ends
            // when the fetch beyond the stuck rows comes back empty
            stuck_rows += batch_len - outcome.processed;
        }
    }
}
