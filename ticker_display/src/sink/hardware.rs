//! Linux wiring for the panel: `spidev` for the bus, GPIO character device for
//! the DC, RST and BUSY lines.
use embedded_hal::digital::OutputPin;
use epd2in13::Epd2in13;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};
use log::debug;
use ticker_common::{DisplayError, Result};

use crate::config::DevicePins;
use crate::sink::PanelFactory;

const SPI_SPEED_HZ: u32 = 4_000_000;
const CONSUMER: &str = "ticker_display";

/// Panel as wired on a Raspberry Pi HAT.
pub type LinuxPanel = Epd2in13<SpidevDevice, CdevPin, CdevPin, CdevPin, Delay>;

/// Opens `spidev` and requests the GPIO lines for each update.
pub struct LinuxPanelFactory {
    pins: DevicePins,
}

impl LinuxPanelFactory {
    /// Factory for the given device nodes and line offsets.
    pub fn new(pins: DevicePins) -> Self {
        Self { pins }
    }

    fn output_line(chip: &mut Chip, offset: u32, initial: u8) -> Result<CdevPin> {
        let handle = chip
            .get_line(offset)
            .and_then(|line| line.request(LineRequestFlags::OUTPUT, initial, CONSUMER))
            .map_err(|e| DisplayError::Panel(format!("GPIO line {}: {}", offset, e)))?;
        CdevPin::new(handle).map_err(|e| DisplayError::Panel(format!("GPIO line {}: {}", offset, e)))
    }

    fn input_line(chip: &mut Chip, offset: u32) -> Result<CdevPin> {
        let handle = chip
            .get_line(offset)
            .and_then(|line| line.request(LineRequestFlags::INPUT, 0, CONSUMER))
            .map_err(|e| DisplayError::Panel(format!("GPIO line {}: {}", offset, e)))?;
        CdevPin::new(handle).map_err(|e| DisplayError::Panel(format!("GPIO line {}: {}", offset, e)))
    }
}

impl PanelFactory for LinuxPanelFactory {
    type Panel = LinuxPanel;

    fn open(&mut self) -> Result<LinuxPanel> {
        debug!(
            "Opening panel on {} (rst={}, dc={}, busy={})",
            self.pins.spi_device.display(),
            self.pins.rst,
            self.pins.dc,
            self.pins.busy
        );
        let mut spi = SpidevDevice::open(&self.pins.spi_device)
            .map_err(|e| DisplayError::Panel(format!("{}: {:?}", self.pins.spi_device.display(), e)))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(SPI_SPEED_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.0.configure(&options)?;

        let mut chip = Chip::new(&self.pins.gpio_chip)
            .map_err(|e| DisplayError::Panel(format!("{}: {}", self.pins.gpio_chip.display(), e)))?;
        let dc = Self::output_line(&mut chip, self.pins.dc, 0)?;
        let mut rst = Self::output_line(&mut chip, self.pins.rst, 1)?;
        rst.set_high()
            .map_err(|e| DisplayError::Panel(format!("GPIO line {}: {:?}", self.pins.rst, e)))?;
        let busy = Self::input_line(&mut chip, self.pins.busy)?;

        Ok(Epd2in13::new(spi, dc, rst, busy, Delay))
    }
}
