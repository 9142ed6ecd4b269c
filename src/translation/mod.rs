/*!
 * Translation pipeline internals.
 *
 * - `resolver`: ordered-endpoint fallback with graceful degradation
 * - `worker`: fixed-size worker pool draining one batch of listings
 */

pub mod resolver;
pub mod worker;

pub use resolver::{EndpointResolver, Translation};
pub use worker::{BatchOutcome, WorkerPool};
