use anyhow::{Result, anyhow};
use isolang::Language as IsoLanguage;

/// Language utilities for the translation pipeline
///
/// This module holds the fixed set of languages the listing table carries
/// columns for, maps ISO 639-1 codes to the column prefixes used by the
/// store, and coerces unrecognized codes to the default before any
/// network call is made.
/// Default language code used when an unrecognized code is encountered
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// A target language supported by the listing table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code (e.g., "en")
    pub code: &'static str,
    /// Column prefix used by the store (e.g., "english" for english_title)
    pub column_prefix: &'static str,
}

/// All languages the listing table has column pairs for
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", column_prefix: "english" },
    Language { code: "sv", column_prefix: "swedish" },
    Language { code: "de", column_prefix: "german" },
    Language { code: "fr", column_prefix: "french" },
    Language { code: "es", column_prefix: "spanish" },
    Language { code: "ar", column_prefix: "arabic" },
    Language { code: "fa", column_prefix: "persian" },
    Language { code: "tr", column_prefix: "turkish" },
];

impl Language {
    /// Column holding the translated title for this language
    pub fn title_column(&self) -> String {
        format!("{}_title", self.column_prefix)
    }

    /// Column holding the translated description for this language
    pub fn description_column(&self) -> String {
        format!("{}_description", self.column_prefix)
    }

    /// Human-readable language name, from the ISO tables
    pub fn name(&self) -> &'static str {
        IsoLanguage::from_639_1(self.code)
            .map(|l| l.to_name())
            .unwrap_or(self.code)
    }
}

/// Look up a supported language by its ISO 639-1 code
pub fn find_language(code: &str) -> Option<&'static Language> {
    let normalized = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.iter().find(|l| l.code == normalized)
}

/// Look up a supported language, failing with a descriptive error
pub fn require_language(code: &str) -> Result<&'static Language> {
    find_language(code).ok_or_else(|| {
        anyhow!(
            "Unsupported language code: {} (supported: {})",
            code,
            SUPPORTED_LANGUAGES
                .iter()
                .map(|l| l.code)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

/// Coerce a language code to one from the supported set
///
/// Trims and lowercases the input; any code outside the supported set is
/// replaced by the default ("en"). Always returns a valid code, so callers
/// can hand the result straight to a translation endpoint.
pub fn coerce_code(code: &str) -> &'static str {
    match find_language(code) {
        Some(language) => language.code,
        None => DEFAULT_LANGUAGE_CODE,
    }
}

/// Check whether a code is a valid ISO 639-1 code at all
///
/// Distinct from being in the supported set: the table only carries columns
/// for SUPPORTED_LANGUAGES, but source languages may be any valid ISO code.
pub fn is_valid_iso_code(code: &str) -> bool {
    IsoLanguage::from_639_1(&code.trim().to_lowercase()).is_some()
}
