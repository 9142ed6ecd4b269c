/*!
 * Client implementations for translation endpoints.
 *
 * This module contains the common provider trait plus the LibreTranslate
 * dialect client used for both the cloud API and self-hosted instances.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation endpoint clients
///
/// This trait defines the interface every endpoint implementation must
/// follow, allowing the fallback resolver to treat them interchangeably
/// and tests to substitute doubles.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate a single text from the source to the target language
    ///
    /// Makes exactly one outbound request per invocation. On any failure
    /// (network error, timeout, non-success status, malformed body) the
    /// error is returned to the caller; the client never silently falls
    /// back to the input text.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;

    /// Check that the endpoint is reachable
    async fn healthcheck(&self) -> Result<(), ProviderError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

pub mod libre;
