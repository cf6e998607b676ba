//!
//! Common types and utilities shared by the ticker display crates.
//!
//! This crate aggregates:
//! - `error` — unified error type `DisplayError` used across the workspace.
//! - `result` — handy `Result<T, DisplayError>` alias.
//! - `quote` — the `Quote` built each poll and its display labels.
//! - `time_series` — JSON payload returned by the quote provider.
//! - `net` — provider endpoint constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod quote;
pub mod time_series;
pub mod net;

pub use error::DisplayError;
pub use result::Result;
pub use quote::{Direction, Quote};
pub use time_series::TimeSeriesResponse;
