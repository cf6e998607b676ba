//! Ticker Display — shows the latest price of one stock on a Waveshare 2.13" e-paper panel.
//!
//! Every two minutes the quote is fetched from Twelve Data, drawn onto a 250×122 canvas
//! and pushed to the panel, which is put to sleep between updates. With `--debug` the
//! frame is saved as `stock_debug.png` instead and the panel is never touched.
//!
//! Usage example (CLI):
//! ```bash
//! TWELVEDATA_API_KEY=... ticker_display --debug --symbol TSLA
//! ```
//!
//! Errors during an update are logged and the next update is attempted on schedule;
//! only invalid startup configuration ends the process.
use clap::Parser;
use log::info;
use ticker_common::{DisplayError, Result};
use ticker_display::args::Args;
use ticker_display::config::Config;
use ticker_display::fetcher::TwelveDataClient;
use ticker_display::render::Renderer;
use ticker_display::runner::Runner;
use ticker_display::sink;

fn main() -> Result<(), DisplayError> {
    init_logger();
    let args = Args::parse();
    let config = Config::from_args(args)?;
    info!(
        "Showing {} ({}) on {}",
        config.symbol, config.timezone, config.output
    );

    let source = TwelveDataClient::new(&config)?;
    let sink = sink::from_config(&config)?;
    let mut runner = Runner::new(
        Box::new(source),
        sink,
        Renderer::new(config.geometry),
        config.interval,
    );

    if config.run_once {
        runner.run_once();
        return Ok(());
    }
    runner.run_forever()
}

/// Log lines, update failures included, go to standard output.
fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .init();
}
