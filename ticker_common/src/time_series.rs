//! Time-series payload returned by the quote provider.
//!
//! A successful response looks like
//! `{"meta": {"symbol": "TSLA", ...}, "values": [{"datetime": ..., "close": "..."}, ...], "status": "ok"}`
//! with `values` ordered newest first. Errors come back as
//! `{"code": 401, "message": "...", "status": "error"}`. Prices are decimal strings.
use serde::Deserialize;

use crate::error::DisplayError;
use crate::quote::Quote;

/// Status value of a successful response.
pub const STATUS_OK: &str = "ok";

/// Top-level time-series response.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesResponse {
    /// `ok` or `error`.
    pub status: String,
    /// Error code, only present on failures.
    #[serde(default)]
    pub code: Option<i64>,
    /// Error message, only present on failures.
    #[serde(default)]
    pub message: Option<String>,
    /// Series metadata.
    #[serde(default)]
    pub meta: Option<Meta>,
    /// Bars, newest first.
    #[serde(default)]
    pub values: Vec<Bar>,
}

/// Series metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    /// Symbol the series belongs to.
    pub symbol: String,
    /// Bar interval, e.g. `1min`.
    #[serde(default)]
    pub interval: Option<String>,
    /// Timezone the bar datetimes are expressed in.
    #[serde(default)]
    pub exchange_timezone: Option<String>,
}

/// One OHLC bar. Only `datetime` and `close` are used.
#[derive(Debug, Clone, Deserialize)]
pub struct Bar {
    /// Bar start, `%Y-%m-%d %H:%M:%S`.
    pub datetime: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub open: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub high: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub low: Option<String>,
    /// Closing price as a decimal string.
    pub close: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub volume: Option<String>,
}

impl Bar {
    /// Parses the closing price.
    pub fn close_price(&self) -> Result<f64, DisplayError> {
        self.close
            .trim()
            .parse::<f64>()
            .map_err(|e| DisplayError::InvalidPrice(format!("close {:?}: {}", self.close, e)))
    }
}

impl TimeSeriesResponse {
    /// Decodes a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, DisplayError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Builds a `Quote` from the two newest bars.
    ///
    /// Any non-`ok` status, missing metadata or fewer than two bars is an error.
    pub fn into_quote(self) -> Result<Quote, DisplayError> {
        if self.status != STATUS_OK {
            return Err(DisplayError::Api {
                code: self.code,
                message: self.message.unwrap_or(self.status),
            });
        }

        let meta = self
            .meta
            .ok_or_else(|| DisplayError::MissingData(String::from("meta")))?;
        let (latest, previous) = match self.values.as_slice() {
            [latest, previous, ..] => (latest, previous),
            values => {
                return Err(DisplayError::MissingData(format!(
                    "need two bars, got {}",
                    values.len()
                )));
            }
        };

        let datetime = Quote::parse_datetime(&latest.datetime)?;
        Quote::from_closes(
            &meta.symbol,
            datetime,
            latest.close_price()?,
            previous.close_price()?,
        )
    }
}
