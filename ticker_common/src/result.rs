//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `DisplayError`, so functions can simply return `Result<T>`.
use crate::error::DisplayError;

/// Workspace-wide `Result` alias with `DisplayError` as the default error.
pub type Result<T, E = DisplayError> = std::result::Result<T, E>;
