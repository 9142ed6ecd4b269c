use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use futures::future::join_all;
use log::{error, debug};
use parking_lot::Mutex;

use crate::language_utils::Language;
use crate::store::{Listing, ListingStore};
use super::resolver::EndpointResolver;

/// Counters for one drained batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Listings translated and written back
    pub processed: usize,
    /// Listings whose write was rejected by the store
    pub failed: usize,
    /// Listings with nothing to write (no usable source text)
    pub skipped: usize,
    /// Listings where every field degraded to the original text
    pub degraded: usize,
}

impl BatchOutcome {
    /// Fold another outcome into this one
    pub fn merge(&mut self, other: &BatchOutcome) {
        self.processed += other.processed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.degraded += other.degraded;
    }

    /// Total number of listings accounted for
    pub fn total(&self) -> usize {
        self.processed + self.failed + self.skipped + self.degraded
    }
}

/// Shared atomic counters the workers update while draining
#[derive(Debug, Default)]
struct OutcomeCounters {
    processed: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
    degraded: AtomicUsize,
}

impl OutcomeCounters {
    fn snapshot(&self) -> BatchOutcome {
        BatchOutcome {
            processed: self.processed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            skipped: self.skipped.load(Ordering::SeqCst),
            degraded: self.degraded.load(Ordering::SeqCst),
        }
    }
}

/// Fixed-size worker pool draining one batch of listings
///
/// Workers share a single queue and pop one listing at a time, so every
/// listing is handled exactly once no matter the concurrency. A failure on
/// one listing never aborts the batch.
pub struct WorkerPool {
    resolver: Arc<EndpointResolver>,
    store: Arc<dyn ListingStore>,
    /// Number of concurrent workers
    concurrency: usize,
    /// Soft throttle each worker applies between listings
    worker_delay: Duration,
}

impl WorkerPool {
    /// Create a pool over the given resolver and store
    pub fn new(
        resolver: Arc<EndpointResolver>,
        store: Arc<dyn ListingStore>,
        concurrency: usize,
        worker_delay: Duration,
    ) -> Self {
        Self {
            resolver,
            store,
            concurrency: concurrency.max(1),
            worker_delay,
        }
    }

    /// Drain one batch, returning once all workers have finished
    pub async fn run_batch(
        &self,
        records: Vec<Listing>,
        language: &'static Language,
        source_language: &str,
    ) -> BatchOutcome {
        let queue = Arc::new(Mutex::new(VecDeque::from(records)));
        let counters = Arc::new(OutcomeCounters::default());

        let workers = (0..self.concurrency).map(|worker_id| {
            let queue = queue.clone();
            let counters = counters.clone();
            let resolver = self.resolver.clone();
            let store = self.store.clone();
            let source_language = source_language.to_string();
            let worker_delay = self.worker_delay;

            tokio::spawn(async move {
                loop {
                    // Atomic pop-or-empty; the lock is held only for the pop
                    let listing = match queue.lock().pop_front() {
                        Some(listing) => listing,
                        None => break,
                    };

                    debug!("Worker {} picked listing {}", worker_id, listing.id);
                    process_listing(&resolver, &*store, &listing, language, &source_language, &counters)
                        .await;

                    if !worker_delay.is_zero() {
                        tokio::time::sleep(worker_delay).await;
                    }
                }
            })
        });

        join_all(workers).await;
        counters.snapshot()
    }
}

/// Translate and persist a single listing, updating the shared counters
async fn process_listing(
    resolver: &EndpointResolver,
    store: &dyn ListingStore,
    listing: &Listing,
    language: &Language,
    source_language: &str,
    counters: &OutcomeCounters,
) {
    if !listing.has_source_text() {
        debug!("Listing {} has no source text, skipping", listing.id);
        counters.skipped.fetch_add(1, Ordering::SeqCst);
        return;
    }

    let mut fields = HashMap::new();
    let mut any_degraded = false;

    let pairs = [
        (listing.title.as_deref(), language.title_column()),
        (listing.description.as_deref(), language.description_column()),
    ];

    for (source_text, column) in pairs {
        let Some(text) = source_text else { continue };
        if text.trim().is_empty() {
            continue;
        }

        let translation = resolver
            .translate_with_fallback(text, source_language, language.code)
            .await;

        if translation.degraded {
            // Persisting the original text would mark the listing as
            // translated without translating it, so degraded fields are
            // left null for the next run
            any_degraded = true;
            continue;
        }
        if translation.text.trim().is_empty() {
            continue;
        }

        fields.insert(column, translation.text);
    }

    if fields.is_empty() {
        if any_degraded {
            counters.degraded.fetch_add(1, Ordering::SeqCst);
        } else {
            counters.skipped.fetch_add(1, Ordering::SeqCst);
        }
        return;
    }

    match store.write_translation(&listing.id, &fields).await {
        Ok(()) => {
            counters.processed.fetch_add(1, Ordering::SeqCst);
        }
        Err(e) => {
            error!("Failed to persist listing {}: {}", listing.id, e);
            counters.failed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
