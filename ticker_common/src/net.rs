//! Quote provider endpoint constants and helpers.

/// Base URL of the Twelve Data REST API.
pub const DEFAULT_API_URL: &str = "https://api.twelvedata.com";
/// Path of the time-series endpoint.
pub const TIME_SERIES_PATH: &str = "/time_series";
/// Bar granularity requested from the provider.
pub const INTERVAL: &str = "1min";
/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "TWELVEDATA_API_KEY";

/// Joins a base URL and the time-series path, tolerating a trailing slash.
pub fn time_series_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), TIME_SERIES_PATH)
}
