/*!
 * Error types for the mass-translate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling a translation endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when sending the request fails (network error or timeout)
    #[error("Translation request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing the endpoint response fails
    #[error("Failed to parse translation response: {0}")]
    ParseError(String),

    /// Non-success status returned by the endpoint
    #[error("Translation endpoint responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the endpoint
        message: String,
    },

    /// Error with authentication (missing or rejected API key)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur when talking to the listing data store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error when sending the request fails
    #[error("Store request failed: {0}")]
    RequestFailed(String),

    /// Non-success status returned by the store
    #[error("Store responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the store
        message: String,
    },

    /// Error when parsing store rows fails
    #[error("Failed to parse store response: {0}")]
    ParseError(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a translation endpoint
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the data store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Run finished but some language passes aborted on store errors
    #[error("Run finished with {0} aborted language pass(es)")]
    Aborted(usize),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
