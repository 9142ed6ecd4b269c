use std::sync::Arc;
use log::{warn, debug};

use crate::language_utils;
use crate::providers::TranslationProvider;
use crate::rate_limit::RateLimiter;

/// Result of a fallback translation
///
/// `degraded` is true when every endpoint failed and `text` is the
/// untranslated input. Callers decide what to do with degraded output;
/// the pipeline skips persisting it so the listing stays in the backlog.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Translated text, or the original input when degraded
    pub text: String,
    /// Whether translation fell back to the original input
    pub degraded: bool,
}

impl Translation {
    fn ok(text: String) -> Self {
        Self { text, degraded: false }
    }

    fn degraded(text: String) -> Self {
        Self { text, degraded: true }
    }
}

/// Tries an ordered list of translation endpoints until one succeeds
///
/// Translation is best-effort: the resolver never returns an error, so a
/// flaky endpoint can slow the pipeline down but not stop it.
pub struct EndpointResolver {
    /// Candidate endpoints, tried strictly in this order
    endpoints: Vec<Arc<dyn TranslationProvider>>,
    /// Shared limiter bounding the whole pool's request rate
    limiter: Arc<RateLimiter>,
}

impl EndpointResolver {
    /// Create a resolver over an ordered endpoint list
    pub fn new(endpoints: Vec<Arc<dyn TranslationProvider>>, limiter: Arc<RateLimiter>) -> Self {
        Self { endpoints, limiter }
    }

    /// Number of configured endpoints
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Translate with fallback across all configured endpoints
    ///
    /// Blank input and equal source/target languages short-circuit with
    /// zero network calls. Unrecognized language codes are coerced to the
    /// supported set before the first call. If every endpoint fails, the
    /// original text is returned with the degraded flag set.
    pub async fn translate_with_fallback(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Translation {
        if text.trim().is_empty() {
            return Translation::ok(String::new());
        }

        let source = language_utils::coerce_code(source);
        let target = language_utils::coerce_code(target);
        if source == target {
            return Translation::ok(text.to_string());
        }

        for endpoint in &self.endpoints {
            self.limiter.acquire().await;

            match endpoint.translate(text, source, target).await {
                Ok(translated) => {
                    self.limiter.record_success();
                    debug!("Translated {} chars via {}", text.len(), endpoint.name());
                    return Translation::ok(translated);
                }
                Err(e) => {
                    self.limiter.record_failure();
                    warn!("Endpoint {} failed, trying next: {}", endpoint.name(), e);
                }
            }
        }

        warn!(
            "All {} endpoints failed, keeping original text ({} -> {})",
            self.endpoints.len(),
            source,
            target
        );
        Translation::degraded(text.to_string())
    }
}
