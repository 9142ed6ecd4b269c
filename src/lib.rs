/*!
 * # mass-translate
 *
 * A Rust batch job for back-filling missing per-language translations of
 * property-listing text fields in a hosted Postgres (Supabase) table.
 *
 * ## Features
 *
 * - Incremental processing: only rows whose target-language title is null
 *   or empty are fetched, so reruns resume naturally
 * - Ordered endpoint fallback across a cloud API, a self-hosted instance
 *   and public mirrors, degrading to the original text as a last resort
 * - Process-wide rate limiting with exponential widening after repeated
 *   failures
 * - Fixed-size worker pool draining each batch through a shared queue
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `language_utils`: Supported-language set and code coercion
 * - `providers`: Clients for LibreTranslate-dialect endpoints
 * - `rate_limit`: Shared rate limiter / backoff controller
 * - `store`: Listing data store trait and PostgREST implementation
 * - `translation`: Fallback resolver and worker pool:
 *   - `translation::resolver`: Ordered-endpoint fallback
 *   - `translation::worker`: Batch worker pool
 * - `app_controller`: Orchestrator over all target languages
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod rate_limit;
pub mod store;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, TranslateMode};
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ProviderError, StoreError};
pub use language_utils::{Language, SUPPORTED_LANGUAGES, coerce_code};
pub use rate_limit::RateLimiter;
pub use store::{Listing, ListingStore};
pub use translation::{BatchOutcome, EndpointResolver, Translation, WorkerPool};
