//! Error types shared by every crate of the workspace.
//!
//! The `DisplayError` enum unifies the failure cases of one display update:
//! fetching the quote, decoding the provider payload, encoding the debug image,
//! and talking to the e-paper panel. The driver loop treats all of them alike.
use std::io;

use thiserror::Error;

/// Unified error type for a display update.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// I/O error originating from the standard library (files, devices).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport failure or non-success HTTP status while fetching a quote.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure while decoding the provider's JSON payload.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The provider answered with a status other than `ok`.
    #[error("API error (code {code:?}): {message}")]
    Api {
        /// Provider error code, when present.
        code: Option<i64>,
        /// Provider error message or the raw status.
        message: String,
    },

    /// A field required to build a quote was absent or empty.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// A closing price could not be parsed or produced a non-finite change.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Bar timestamp did not match the provider's datetime format.
    #[error("Datetime parse error: {0}")]
    DateTime(#[from] chrono::ParseError),

    /// Failure while writing the debug PNG.
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    /// The e-paper panel reported a fault or could not be opened.
    #[error("Panel error: {0}")]
    Panel(String),

    /// Startup configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(String),
}
