//! Error types for feed-comments
//!
//! This module provides the error taxonomy for the library:
//! - [`LoadError`] - the closed set of failures surfaced past the loader boundary
//! - [`MappingError`] - why a response payload was rejected by the mapper
//! - [`HttpClientError`] - transport-level failures reported by an HTTP client
//! - [`Error`] - construction and configuration errors

use thiserror::Error;

/// Result type alias for feed-comments operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for feed-comments
///
/// Returned while building clients and loading configuration. Load failures
/// never use this type; they are reported through [`LoadError`].
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "http.timeout")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure delivered to a load completion
///
/// Both variants are terminal for a single load attempt. Cancellation is not
/// an error: a cancelled load never completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No response was obtained from the server
    #[error("connectivity error: no response obtained")]
    Connectivity,

    /// A response was obtained but failed validation or decoding
    #[error("invalid data: response failed validation")]
    InvalidData,
}

/// Reason a response was rejected by [`CommentsMapper`](crate::mapper::CommentsMapper)
///
/// The loader collapses every variant into [`LoadError::InvalidData`].
#[derive(Debug, Error)]
pub enum MappingError {
    /// Status code outside the 2xx range
    #[error("unexpected HTTP status {0}")]
    InvalidStatus(u16),

    /// Top-level JSON value is not an object
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// Body is not well-formed JSON of the expected shape
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport failure reported by an [`HttpClient`](crate::http::HttpClient)
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request could not be completed
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}
