//! Quote model and the labels derived from it.
//!
//! A `Quote` is produced fresh on every poll from the two newest bars of the
//! provider's time series and is dropped once it has been rendered.

use chrono::NaiveDateTime;
use strum_macros::{Display, EnumString};

use crate::error::DisplayError;

/// Datetime layout used by the provider for intraday bars.
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Human readable layout drawn on the panel.
pub const LABEL_DATETIME_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Sign of the price move, drawn as a triangle next to the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Direction {
    /// Zero or positive change.
    #[strum(serialize = "▲")]
    Up,
    /// Negative change.
    #[strum(serialize = "▼")]
    Down,
}

impl Direction {
    /// Classifies a percent change; zero counts as `Up`.
    pub fn of(pct_change: f64) -> Self {
        if pct_change >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Latest price of one symbol and its change against the previous bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Ticker symbol as reported by the provider (e.g., `TSLA`).
    pub symbol: String,
    /// Local time of the latest bar.
    pub datetime: NaiveDateTime,
    /// Latest closing price.
    pub price: f64,
    /// Percent change between the previous and the latest close.
    pub pct_change: f64,
}

impl Quote {
    /// Builds a quote from the two newest closes.
    ///
    /// Fails when the previous close is zero or any input is not finite, since
    /// the resulting change could not be drawn.
    pub fn from_closes(
        symbol: &str,
        datetime: NaiveDateTime,
        latest: f64,
        previous: f64,
    ) -> Result<Self, DisplayError> {
        let pct_change = Self::pct_change(latest, previous);
        if !latest.is_finite() || !pct_change.is_finite() {
            return Err(DisplayError::InvalidPrice(format!(
                "cannot compute change from {} to {}",
                previous, latest
            )));
        }
        Ok(Quote {
            symbol: String::from(symbol),
            datetime,
            price: latest,
            pct_change,
        })
    }

    /// Percent change from `previous` to `latest`.
    pub fn pct_change(latest: f64, previous: f64) -> f64 {
        (latest - previous) / previous * 100.0
    }

    /// Parses a provider datetime such as `2024-03-05 09:31:00`.
    pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, DisplayError> {
        Ok(NaiveDateTime::parse_from_str(raw.trim(), API_DATETIME_FORMAT)?)
    }

    /// Direction of the move.
    pub fn direction(&self) -> Direction {
        Direction::of(self.pct_change)
    }

    /// Upper-cased ticker for the left panel.
    pub fn ticker_label(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Price with a dollar sign and two decimals, e.g. `$251.30`.
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Percent change with four decimals and an explicit `+` when not negative.
    pub fn change_label(&self) -> String {
        format_pct_change(self.pct_change)
    }

    /// Timestamp such as `Mar 05, 2024 09:31 AM`.
    pub fn timestamp_label(&self) -> String {
        self.datetime.format(LABEL_DATETIME_FORMAT).to_string()
    }
}

/// Formats a percent change as `+2.5135%` or `-0.1000%`.
pub fn format_pct_change(pct_change: f64) -> String {
    match Direction::of(pct_change) {
        // abs() folds -0.0 into +0.0000%
        Direction::Up => format!("+{:.4}%", pct_change.abs()),
        Direction::Down => format!("{:.4}%", pct_change),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt() -> NaiveDateTime {
        Quote::parse_datetime("2024-03-05 09:31:00").unwrap()
    }

    #[test]
    fn test_pct_change_one_percent() {
        let quote = Quote::from_closes("TSLA", dt(), 101.0, 100.0).unwrap();
        assert!((quote.pct_change - 1.0).abs() < 1e-12);
        assert_eq!(quote.price, 101.0);
    }

    #[test]
    fn test_change_label_positive_rounds_to_four_places() {
        assert_eq!(format_pct_change(2.51347), "+2.5135%");
    }

    #[test]
    fn test_change_label_negative_has_no_plus() {
        assert_eq!(format_pct_change(-0.1), "-0.1000%");
        assert_eq!(Direction::of(-0.1).to_string(), "▼");
    }

    #[test]
    fn test_zero_change_is_up() {
        assert_eq!(format_pct_change(0.0), "+0.0000%");
        assert_eq!(format_pct_change(-0.0), "+0.0000%");
        assert_eq!(Direction::of(0.0), Direction::Up);
    }

    #[test]
    fn test_direction_from_glyph() {
        assert_eq!("▲".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("▼".parse::<Direction>().unwrap(), Direction::Down);
    }

    #[test]
    fn test_timestamp_label() {
        let quote = Quote::from_closes("tsla", dt(), 1.0, 1.0).unwrap();
        assert_eq!(quote.timestamp_label(), "Mar 05, 2024 09:31 AM");
    }

    #[test]
    fn test_timestamp_label_afternoon() {
        let datetime = Quote::parse_datetime("2024-12-31 15:04:59").unwrap();
        let quote = Quote::from_closes("TSLA", datetime, 1.0, 1.0).unwrap();
        assert_eq!(quote.timestamp_label(), "Dec 31, 2024 03:04 PM");
    }

    #[test]
    fn test_labels() {
        let quote = Quote::from_closes("tsla", dt(), 251.304, 250.0).unwrap();
        assert_eq!(quote.ticker_label(), "TSLA");
        assert_eq!(quote.price_label(), "$251.30");
    }

    #[test]
    fn test_zero_previous_close_rejected() {
        let err = Quote::from_closes("TSLA", dt(), 10.0, 0.0).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidPrice(_)));
    }

    #[test]
    fn test_bad_datetime_rejected() {
        let err = Quote::parse_datetime("2024-03-05").unwrap_err();
        assert!(matches!(err, DisplayError::DateTime(_)));
    }
}
