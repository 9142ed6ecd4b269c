/*!
 * Tests for the batch worker pool
 */

use std::sync::Arc;
use std::time::Duration;

use mass_translate::language_utils::require_language;
use mass_translate::providers::TranslationProvider;
use mass_translate::rate_limit::RateLimiter;
use mass_translate::store::Listing;
use mass_translate::translation::{EndpointResolver, WorkerPool};

use crate::common::mock_providers::{FailingTranslator, MockTranslator};
use crate::common::mock_store::InMemoryStore;

fn pool_over(
    endpoints: Vec<Arc<dyn TranslationProvider>>,
    store: Arc<InMemoryStore>,
    concurrency: usize,
) -> WorkerPool {
    let resolver = Arc::new(EndpointResolver::new(
        endpoints,
        Arc::new(RateLimiter::new(Duration::ZERO)),
    ));
    WorkerPool::new(resolver, store, concurrency, Duration::ZERO)
}

fn listings(count: usize) -> Vec<Listing> {
    (1..=count)
        .map(|i| Listing::new(i.to_string(), Some(format!("Titel {}", i)), None))
        .collect()
}

/// Test exactly-once processing regardless of concurrency
#[tokio::test]
async fn test_run_batch_withManyWorkers_shouldProcessEveryRecordExactlyOnce() {
    for concurrency in [1, 3, 8] {
        let store = Arc::new(InMemoryStore::with_listings(listings(20)));
        let mock = Arc::new(MockTranslator::echoing("mock"));
        let pool = pool_over(vec![mock], store.clone(), concurrency);
        let language = require_language("en").unwrap();

        let outcome = pool.run_batch(listings(20), language, "sv").await;

        assert_eq!(outcome.processed, 20, "concurrency {}", concurrency);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.total(), 20);
        for i in 1..=20 {
            assert_eq!(store.write_count(&i.to_string()), 1);
        }
    }
}

/// Test that records without source text are skipped, not written
#[tokio::test]
async fn test_run_batch_withEmptySourceText_shouldSkipWithoutWriting() {
    let records = vec![
        Listing::new("1", Some("Hej".to_string()), None),
        Listing::new("2", Some("".to_string()), None),
        Listing::new("3", None, None),
    ];
    let store = Arc::new(InMemoryStore::with_listings(records.clone()));
    let mock = Arc::new(MockTranslator::echoing("mock"));
    let pool = pool_over(vec![mock], store.clone(), 2);
    let language = require_language("en").unwrap();

    let outcome = pool.run_batch(records, language, "sv").await;

    assert_eq!(outcome.processed, 1);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.failed, 0);
    assert_eq!(store.write_count("2"), 0);
    assert_eq!(store.write_count("3"), 0);
}

/// Test that both title and description columns are written
#[tokio::test]
async fn test_run_batch_withTitleAndDescription_shouldWriteBothColumns() {
    let records = vec![Listing::new(
        "1",
        Some("Hej".to_string()),
        Some("Stor balkong".to_string()),
    )];
    let store = Arc::new(InMemoryStore::with_listings(records.clone()));
    let mock = Arc::new(MockTranslator::echoing("mock"));
    let pool = pool_over(vec![mock], store.clone(), 1);
    let language = require_language("en").unwrap();

    let outcome = pool.run_batch(records, language, "sv").await;

    assert_eq!(outcome.processed, 1);
    assert_eq!(store.translation("1", "english_title").unwrap(), "[en] Hej");
    assert_eq!(
        store.translation("1", "english_description").unwrap(),
        "[en] Stor balkong"
    );
}

/// Test that a store write failure counts the record as failed only
#[tokio::test]
async fn test_run_batch_withWriteFailures_shouldCountFailedAndContinue() {
    let store = Arc::new(InMemoryStore::with_listings(listings(5)));
    store.fail_writes();
    let mock = Arc::new(MockTranslator::echoing("mock"));
    let pool = pool_over(vec![mock], store.clone(), 2);
    let language = require_language("en").unwrap();

    let outcome = pool.run_batch(listings(5), language, "sv").await;

    assert_eq!(outcome.processed, 0);
    assert_eq!(outcome.failed, 5);
    assert_eq!(outcome.total(), 5);
}

/// Test that fully degraded records are not persisted and not failed
#[tokio::test]
async fn test_run_batch_withAllEndpointsFailing_shouldCountDegradedWithoutWrites() {
    let store = Arc::new(InMemoryStore::with_listings(listings(2)));
    let failing = Arc::new(FailingTranslator::new("fail", 500));
    let pool = pool_over(vec![failing], store.clone(), 2);
    let language = require_language("en").unwrap();

    let outcome = pool.run_batch(listings(2), language, "sv").await;

    assert_eq!(outcome.processed, 0);
    assert_eq!(outcome.failed, 0);
    assert_eq!(outcome.degraded, 2);
    assert_eq!(store.total_writes(), 0);
}
