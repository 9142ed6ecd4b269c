/*!
 * Listing data store access.
 *
 * This module defines the store trait the pipeline runs against (fetching
 * pages of untranslated listings, writing translated fields back) and the
 * PostgREST-backed implementation used in production.
 */

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::StoreError;
use crate::language_utils::Language;

pub mod models;
pub mod supabase;

pub use models::Listing;

/// Data store holding the translatable listings
///
/// The trait is the seam between the pipeline and the hosted database, so
/// tests can run the full pipeline against an in-memory double.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Fetch one page of listings still untranslated for a language
    ///
    /// Selects rows whose target-language title column is null or empty,
    /// skipping the first `offset` matching rows and limited to
    /// `batch_size`, in store-default order. The offset lets callers page
    /// past rows that stay in the predicate (blank sources, degraded
    /// translations, rejected writes) instead of refetching them forever.
    /// An empty result means the language pass is complete; it is not an
    /// error.
    async fn fetch_untranslated(
        &self,
        language: &Language,
        batch_size: usize,
        offset: usize,
    ) -> Result<Vec<Listing>, StoreError>;

    /// Write translated fields back for a single listing
    ///
    /// Partial update keyed by primary key; callers only include fields
    /// with non-empty translated values. Last writer wins.
    async fn write_translation(
        &self,
        id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<(), StoreError>;
}
