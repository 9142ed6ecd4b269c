use serde::{Deserialize, Serialize};

/// One listing row needing translation
///
/// Only the primary key and the canonical source fields are fetched; the
/// target-language columns are known to be null or empty by the fetch
/// predicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// Opaque unique identifier, assigned by the store
    pub id: String,
    /// Source-language title
    pub title: Option<String>,
    /// Source-language description
    pub description: Option<String>,
}

impl Listing {
    /// Create a listing from its parts
    pub fn new(
        id: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            description,
        }
    }

    /// Whether the listing carries any non-blank source text at all
    pub fn has_source_text(&self) -> bool {
        let non_blank = |field: &Option<String>| {
            field.as_deref().is_some_and(|t| !t.trim().is_empty())
        };
        non_blank(&self.title) || non_blank(&self.description)
    }
}
