//! Frame destinations.
//!
//! An [`OutputSink`] receives each finished canvas:
//! - `file` — debug mode, writes a 1-bit PNG.
//! - `device` — opens the e-paper panel, pushes the frame and puts it to sleep.
//! - `hardware` — Linux `spidev`/GPIO wiring for the panel (`hardware` feature, on by default).
pub mod device;
pub mod file;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod hardware;

pub use device::{DeviceSink, EpaperPanel, PanelFactory};
pub use file::FileSink;

use ticker_common::Result;

use crate::canvas::Canvas;
use crate::config::{Config, OutputMode};

/// Destination of finished frames.
pub trait OutputSink {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Hands one frame to the destination.
    fn present(&mut self, canvas: &Canvas) -> Result<()>;
}

/// Picks the sink for the configured output mode.
pub fn from_config(config: &Config) -> Result<Box<dyn OutputSink>> {
    match &config.output {
        OutputMode::File(path) => Ok(Box::new(FileSink::new(path.clone()))),
        OutputMode::Device(pins) => device_sink(pins),
    }
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
fn device_sink(pins: &crate::config::DevicePins) -> Result<Box<dyn OutputSink>> {
    Ok(Box::new(DeviceSink::new(hardware::LinuxPanelFactory::new(
        pins.clone(),
    ))))
}

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
fn device_sink(pins: &crate::config::DevicePins) -> Result<Box<dyn OutputSink>> {
    Err(ticker_common::DisplayError::Config(format!(
        "panel on {} requested but this build has no Linux `hardware` support; use --debug",
        pins.spi_device.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;

    fn config(extra: &[&str]) -> Config {
        let mut argv = vec!["ticker_display", "--api-key", "secret-key"];
        argv.extend_from_slice(extra);
        Config::from_args(Args::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_debug_mode_selects_file_sink() {
        assert_eq!(from_config(&config(&["--debug"])).unwrap().name(), "file");
    }

    // building the sink does not open the bus, so no spidev node is needed
    #[cfg(all(feature = "hardware", target_os = "linux"))]
    #[test]
    fn test_default_mode_selects_device_sink() {
        assert_eq!(from_config(&config(&[])).unwrap().name(), "device");
    }

    #[cfg(not(all(feature = "hardware", target_os = "linux")))]
    #[test]
    fn test_default_mode_without_hardware_is_config_error() {
        let err = from_config(&config(&[])).err().unwrap();
        assert!(matches!(err, ticker_common::DisplayError::Config(_)));
    }
}
