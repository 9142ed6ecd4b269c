/*!
 * Tests for the endpoint fallback resolver
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use mass_translate::providers::TranslationProvider;
use mass_translate::rate_limit::RateLimiter;
use mass_translate::translation::EndpointResolver;

use crate::common::mock_providers::{FailingTranslator, MockTranslator};

fn resolver_over(
    endpoints: Vec<Arc<dyn TranslationProvider>>,
) -> EndpointResolver {
    EndpointResolver::new(endpoints, Arc::new(RateLimiter::new(Duration::ZERO)))
}

/// Test identity on equal source and target languages
#[tokio::test]
async fn test_translate_withSameSourceAndTarget_shouldReturnInputWithoutCalls() {
    let mock = Arc::new(MockTranslator::echoing("mock"));
    let resolver = resolver_over(vec![mock.clone()]);

    let result = resolver.translate_with_fallback("Fin sjöutsikt", "sv", "sv").await;

    assert_eq!(result.text, "Fin sjöutsikt");
    assert!(!result.degraded);
    assert_eq!(mock.call_count(), 0);
}

/// Test that blank input short-circuits with no network call
#[tokio::test]
async fn test_translate_withBlankInput_shouldReturnEmptyWithoutCalls() {
    let mock = Arc::new(MockTranslator::echoing("mock"));
    let resolver = resolver_over(vec![mock.clone()]);

    let result = resolver.translate_with_fallback("   ", "sv", "en").await;

    assert_eq!(result.text, "");
    assert!(!result.degraded);
    assert_eq!(mock.call_count(), 0);
}

/// Test coercion of unrecognized codes before the call is made
#[tokio::test]
async fn test_translate_withUnsupportedSourceCode_shouldCoerceToDefault() {
    let mock = Arc::new(MockTranslator::echoing("mock"));
    let resolver = resolver_over(vec![mock.clone()]);

    let result = resolver.translate_with_fallback("text", "xx", "de").await;
    assert!(!result.degraded);

    let tracker = mock.tracker();
    let (_, source, target) = tracker.lock().unwrap().last_call.clone().unwrap();
    assert_eq!(source, "en");
    assert_eq!(target, "de");
}

/// Test that coercion can collapse source and target into a no-op
#[tokio::test]
async fn test_translate_withBothCodesUnsupported_shouldBecomeIdentity() {
    let mock = Arc::new(MockTranslator::echoing("mock"));
    let resolver = resolver_over(vec![mock.clone()]);

    // Both coerce to the default, so no call is made
    let result = resolver.translate_with_fallback("text", "xx", "yy").await;

    assert_eq!(result.text, "text");
    assert!(!result.degraded);
    assert_eq!(mock.call_count(), 0);
}

/// Test the short-circuit property across a failing prefix
///
/// With endpoints 1..k-1 failing and endpoint k succeeding, exactly k
/// calls are made and the later endpoints are never touched.
#[tokio::test]
async fn test_translate_withFailingPrefix_shouldShortCircuitAtFirstSuccess() {
    let failing_one = Arc::new(FailingTranslator::new("fail-1", 500));
    let failing_two = Arc::new(FailingTranslator::new("fail-2", 502));
    let succeeding = Arc::new(MockTranslator::new(
        "ok",
        HashMap::from([("Hej".to_string(), "Hello".to_string())]),
    ));
    let untouched = Arc::new(MockTranslator::echoing("untouched"));

    let resolver = resolver_over(vec![
        failing_one.clone(),
        failing_two.clone(),
        succeeding.clone(),
        untouched.clone(),
    ]);

    let result = resolver.translate_with_fallback("Hej", "sv", "en").await;

    assert_eq!(result.text, "Hello");
    assert!(!result.degraded);
    assert_eq!(failing_one.call_count(), 1);
    assert_eq!(failing_two.call_count(), 1);
    assert_eq!(succeeding.call_count(), 1);
    assert_eq!(untouched.call_count(), 0);
}

/// Test graceful degradation when every endpoint fails
#[tokio::test]
async fn test_translate_withAllEndpointsFailing_shouldReturnOriginalDegraded() {
    let failing_one = Arc::new(FailingTranslator::new("fail-1", 500));
    let failing_two = Arc::new(FailingTranslator::new("fail-2", 500));
    let resolver = resolver_over(vec![failing_one.clone(), failing_two.clone()]);

    let result = resolver.translate_with_fallback("Hej", "sv", "en").await;

    assert_eq!(result.text, "Hej");
    assert!(result.degraded);
    assert_eq!(failing_one.call_count(), 1);
    assert_eq!(failing_two.call_count(), 1);
}

/// Test that failures feed the shared limiter's failure counter
#[tokio::test]
async fn test_translate_withFailures_shouldUpdateLimiterCounters() {
    let limiter = Arc::new(RateLimiter::new(Duration::ZERO));
    let failing = Arc::new(FailingTranslator::new("fail", 500));
    let succeeding = Arc::new(MockTranslator::echoing("ok"));
    let resolver = EndpointResolver::new(
        vec![failing as Arc<dyn TranslationProvider>, succeeding],
        limiter.clone(),
    );

    let result = resolver.translate_with_fallback("text", "sv", "en").await;

    assert!(!result.degraded);
    // One failure, then the success reset the counter
    assert_eq!(limiter.consecutive_failures(), 0);
}
