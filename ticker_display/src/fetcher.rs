//! Quote fetching over HTTP.
//!
//! One blocking GET per poll against the provider's time-series endpoint with
//! 1-minute bars. The two newest bars become a [`Quote`]; anything else is an error
//! and the poll is abandoned until the next cycle.
use log::debug;
use reqwest::blocking::{Client, ClientBuilder};
use ticker_common::net::{time_series_url, INTERVAL};
use ticker_common::{DisplayError, Quote, Result, TimeSeriesResponse};

use crate::config::Config;

/// Anything that can produce the current quote.
pub trait QuoteSource {
    /// Fetches the latest quote.
    fn fetch(&self) -> Result<Quote>;
}

/// Twelve Data time-series client.
pub struct TwelveDataClient {
    http: Client,
    url: String,
    api_key: String,
    symbol: String,
    timezone: String,
}

impl TwelveDataClient {
    /// Builds a client with the configured timeout.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_builder(config, Client::builder())
    }

    /// Builds a client from a caller-prepared `reqwest` builder.
    pub fn with_builder(config: &Config, builder: ClientBuilder) -> Result<Self> {
        let http = builder
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: time_series_url(&config.api_url),
            api_key: config.api_key.clone(),
            symbol: config.symbol.clone(),
            timezone: config.timezone.clone(),
        })
    }
}

impl QuoteSource for TwelveDataClient {
    fn fetch(&self) -> Result<Quote> {
        debug!(
            "GET {} symbol={} interval={} timezone={}",
            self.url, self.symbol, INTERVAL, self.timezone
        );
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("symbol", self.symbol.as_str()),
                ("interval", INTERVAL),
                ("timezone", self.timezone.as_str()),
            ])
            .send()
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        // the request URL carries the API key
        let body = response.bytes().map_err(reqwest::Error::without_url)?;

        match TimeSeriesResponse::from_slice(&body) {
            Ok(series) => series.into_quote(),
            Err(_) if !status.is_success() => Err(DisplayError::Api {
                code: Some(i64::from(status.as_u16())),
                message: status.to_string(),
            }),
            Err(e) => Err(e),
        }
    }
}
