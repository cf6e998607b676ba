//! Command-line arguments for the ticker display.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;
use ticker_common::net::{API_KEY_ENV, DEFAULT_API_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Quote provider API key.
    #[clap(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: String,

    /// Save frames as a PNG instead of driving the e-paper panel.
    ///
    /// Without it the panel is driven, which needs a Linux build with the
    /// `hardware` feature (on by default).
    #[clap(long)]
    pub debug: bool,

    /// PNG path used with `--debug`.
    #[clap(long, default_value = "stock_debug.png")]
    pub output: PathBuf,

    /// Ticker symbol to show.
    #[clap(long, default_value = "TSLA")]
    pub symbol: String,

    /// Timezone the provider reports bar times in.
    #[clap(long, default_value = "Asia/Kuala_Lumpur")]
    pub timezone: String,

    /// Seconds between updates.
    #[clap(long, default_value_t = 120)]
    pub interval_secs: u64,

    /// Provider base URL.
    #[clap(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// HTTP timeout in seconds.
    #[clap(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Run a single update and exit.
    #[clap(long)]
    pub once: bool,

    /// SPI device the panel is attached to.
    #[clap(long, default_value = "/dev/spidev0.0")]
    pub spi_device: PathBuf,

    /// GPIO character device for the control lines.
    #[clap(long, default_value = "/dev/gpiochip0")]
    pub gpio_chip: PathBuf,

    /// Reset line offset.
    #[clap(long, default_value_t = 17)]
    pub rst_pin: u32,

    /// Data/command line offset.
    #[clap(long, default_value_t = 25)]
    pub dc_pin: u32,

    /// Busy line offset.
    #[clap(long, default_value_t = 24)]
    pub busy_pin: u32,
}
