//! Immutable runtime configuration.
//!
//! Built once from [`Args`] at startup and handed to each component; nothing
//! reads the environment or the command line after this point.
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ticker_common::{DisplayError, Result};

use crate::args::Args;
use crate::layout::Geometry;

/// Where finished frames go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Debug mode: save a PNG at this path.
    File(PathBuf),
    /// Drive the e-paper panel.
    Device(DevicePins),
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::File(path) => write!(f, "file {}", path.display()),
            OutputMode::Device(pins) => write!(f, "panel on {}", pins.spi_device.display()),
        }
    }
}

/// Bus and line offsets of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePins {
    /// SPI device node.
    pub spi_device: PathBuf,
    /// GPIO character device.
    pub gpio_chip: PathBuf,
    /// Reset line offset.
    pub rst: u32,
    /// Data/command line offset.
    pub dc: u32,
    /// Busy line offset.
    pub busy: u32,
}

/// Process-wide settings, fixed at startup.
#[derive(Clone)]
pub struct Config {
    /// Ticker symbol.
    pub symbol: String,
    /// Timezone for bar datetimes.
    pub timezone: String,
    /// Provider API key.
    pub api_key: String,
    /// Provider base URL.
    pub api_url: String,
    /// HTTP timeout.
    pub timeout: Duration,
    /// Pause between updates.
    pub interval: Duration,
    /// Stop after one update.
    pub run_once: bool,
    /// Frame destination.
    pub output: OutputMode,
    /// Canvas geometry.
    pub geometry: Geometry,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("symbol", &self.symbol)
            .field("timezone", &self.timezone)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("interval", &self.interval)
            .field("run_once", &self.run_once)
            .field("output", &self.output)
            .field("geometry", &self.geometry)
            .finish()
    }
}

impl Config {
    /// Validates `args` and freezes them.
    pub fn from_args(args: Args) -> Result<Self> {
        let api_key = args.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(DisplayError::Config(String::from("API key is empty")));
        }
        let symbol = args.symbol.trim().to_string();
        if symbol.is_empty() {
            return Err(DisplayError::Config(String::from("symbol is empty")));
        }
        if args.interval_secs == 0 {
            return Err(DisplayError::Config(String::from(
                "interval must be at least one second",
            )));
        }
        if args.timeout_secs == 0 {
            return Err(DisplayError::Config(String::from(
                "timeout must be at least one second",
            )));
        }

        let output = if args.debug {
            OutputMode::File(args.output)
        } else {
            OutputMode::Device(DevicePins {
                spi_device: args.spi_device,
                gpio_chip: args.gpio_chip,
                rst: args.rst_pin,
                dc: args.dc_pin,
                busy: args.busy_pin,
            })
        };

        Ok(Config {
            symbol,
            timezone: args.timezone.trim().to_string(),
            api_key,
            api_url: args.api_url,
            timeout: Duration::from_secs(args.timeout_secs),
            interval: Duration::from_secs(args.interval_secs),
            run_once: args.once,
            output,
            geometry: Geometry::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(extra: &[&str]) -> Result<Config> {
        let mut argv = vec!["ticker_display", "--api-key", "secret-key"];
        argv.extend_from_slice(extra);
        Config::from_args(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.symbol, "TSLA");
        assert_eq!(config.timezone, "Asia/Kuala_Lumpur");
        assert_eq!(config.interval, Duration::from_secs(120));
        assert_eq!(config.api_url, "https://api.twelvedata.com");
        assert!(!config.run_once);
        assert_eq!(config.geometry, Geometry::default());
        match config.output {
            OutputMode::Device(pins) => {
                assert_eq!(pins.spi_device, PathBuf::from("/dev/spidev0.0"));
                assert_eq!((pins.rst, pins.dc, pins.busy), (17, 25, 24));
            }
            other => panic!("unexpected output {other}"),
        }
    }

    #[test]
    fn test_debug_selects_file_output() {
        let config = parse(&["--debug"]).unwrap();
        assert_eq!(config.output, OutputMode::File(PathBuf::from("stock_debug.png")));
    }

    #[test]
    fn test_debug_with_custom_path() {
        let config = parse(&["--debug", "--output", "/tmp/frame.png", "--once"]).unwrap();
        assert_eq!(config.output, OutputMode::File(PathBuf::from("/tmp/frame.png")));
        assert!(config.run_once);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = parse(&["--interval-secs", "0"]).unwrap_err();
        assert!(matches!(err, DisplayError::Config(_)));
    }

    #[test]
    fn test_blank_symbol_rejected() {
        let err = parse(&["--symbol", "  "]).unwrap_err();
        assert!(matches!(err, DisplayError::Config(_)));
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let config = parse(&[]).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("<redacted>"));
    }
}
