//! Driver for 2.13" 250×122 monochrome e-paper panels (Waveshare V3, SSD1680 family).
//!
//! The panel is addressed in its native portrait orientation: 122 pixels wide,
//! 250 rows high, one bit per pixel, most significant bit first, `1` = white.
//! Each row therefore takes 16 bytes and a full frame is [`BUFFER_LEN`] bytes.
//!
//! The driver exposes the four calls an update needs:
//!
//! - [`Epd2in13::init`] — hardware reset and controller setup.
//! - [`Epd2in13::clear`] — fill the frame with a byte pattern and refresh.
//! - [`Epd2in13::display`] — write a full frame and refresh.
//! - [`Epd2in13::sleep`] — enter deep sleep; the next update must `init` again.
//!
//! It is generic over the embedded-hal 1.0 traits, so it runs on Linux
//! `spidev`/GPIO as well as against test doubles.
#![warn(missing_docs)]
mod cmd;
mod error;

pub use error::EpdError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::debug;

/// Native panel width in pixels (portrait).
pub const WIDTH: u32 = 122;
/// Native panel height in pixels (portrait).
pub const HEIGHT: u32 = 250;
/// Bytes per row, rounded up to whole bytes.
pub const LINE_BYTES: usize = (WIDTH as usize).div_ceil(8);
/// Bytes in a full frame.
pub const BUFFER_LEN: usize = LINE_BYTES * HEIGHT as usize;
/// Byte value for an all-white row segment.
pub const WHITE: u8 = 0xFF;

/// Upper bound for a single BUSY wait.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 10_000;
const BUSY_POLL_MS: u32 = 10;
/// Time the controller needs to latch deep sleep before power may be cut.
const SLEEP_SETTLE_MS: u32 = 2_000;

/// SSD1680 panel on a 4-wire SPI bus with DC, RST and BUSY lines.
pub struct Epd2in13<SPI, DC, RST, BUSY, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: DELAY,
    busy_timeout_ms: u32,
}

impl<SPI, DC, RST, BUSY, DELAY> Epd2in13<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    /// Wraps the bus and pins. No traffic happens until [`Self::init`].
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, delay: DELAY) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            delay,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Overrides the BUSY wait limit.
    pub fn with_busy_timeout(mut self, timeout_ms: u32) -> Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Resets the controller and configures a full-screen window.
    pub fn init(&mut self) -> Result<(), EpdError> {
        self.reset()?;
        self.wait_until_idle()?;
        self.command(cmd::SW_RESET)?;
        self.wait_until_idle()?;

        let last_row = (HEIGHT - 1) as u16;
        self.command_with_data(
            cmd::DRIVER_OUTPUT_CONTROL,
            &[(last_row & 0xFF) as u8, (last_row >> 8) as u8, 0x00],
        )?;
        // X increment, Y increment
        self.command_with_data(cmd::DATA_ENTRY_MODE, &[0x03])?;
        self.set_window(0, 0, WIDTH - 1, HEIGHT - 1)?;
        self.set_cursor(0, 0)?;
        self.command_with_data(cmd::BORDER_WAVEFORM, &[0x05])?;
        self.command_with_data(cmd::DISPLAY_UPDATE_CONTROL_1, &[0x00, 0x80])?;
        // internal temperature sensor
        self.command_with_data(cmd::TEMPERATURE_SENSOR, &[0x80])?;
        self.wait_until_idle()
    }

    /// Fills the whole frame with `pattern` and refreshes.
    pub fn clear(&mut self, pattern: u8) -> Result<(), EpdError> {
        self.command(cmd::WRITE_RAM_BW)?;
        let row = [pattern; LINE_BYTES];
        for _ in 0..HEIGHT {
            self.data(&row)?;
        }
        self.turn_on_display()
    }

    /// Writes a full frame of [`BUFFER_LEN`] bytes and refreshes.
    pub fn display(&mut self, buffer: &[u8]) -> Result<(), EpdError> {
        if buffer.len() != BUFFER_LEN {
            return Err(EpdError::BufferSize {
                expected: BUFFER_LEN,
                actual: buffer.len(),
            });
        }
        self.command(cmd::WRITE_RAM_BW)?;
        self.data(buffer)?;
        self.turn_on_display()
    }

    /// Puts the controller into deep sleep.
    pub fn sleep(&mut self) -> Result<(), EpdError> {
        self.command_with_data(cmd::DEEP_SLEEP, &[0x01])?;
        self.delay.delay_ms(SLEEP_SETTLE_MS);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), EpdError> {
        self.rst.set_high().map_err(EpdError::pin)?;
        self.delay.delay_ms(20);
        self.rst.set_low().map_err(EpdError::pin)?;
        self.delay.delay_ms(2);
        self.rst.set_high().map_err(EpdError::pin)?;
        self.delay.delay_ms(20);
        Ok(())
    }

    /// BUSY is high while the controller works.
    fn wait_until_idle(&mut self) -> Result<(), EpdError> {
        let mut waited_ms = 0;
        while self.busy.is_high().map_err(EpdError::pin)? {
            if waited_ms >= self.busy_timeout_ms {
                return Err(EpdError::BusyTimeout(waited_ms));
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited_ms += BUSY_POLL_MS;
        }
        if waited_ms > 0 {
            debug!("Panel busy for {} ms", waited_ms);
        }
        Ok(())
    }

    fn turn_on_display(&mut self) -> Result<(), EpdError> {
        // load temperature and OTP waveform, then full refresh
        self.command_with_data(cmd::DISPLAY_UPDATE_CONTROL_2, &[0xF7])?;
        self.command(cmd::MASTER_ACTIVATION)?;
        self.wait_until_idle()
    }

    fn set_window(&mut self, x_start: u32, y_start: u32, x_end: u32, y_end: u32) -> Result<(), EpdError> {
        self.command_with_data(
            cmd::SET_RAM_X_RANGE,
            &[((x_start >> 3) & 0xFF) as u8, ((x_end >> 3) & 0xFF) as u8],
        )?;
        self.command_with_data(
            cmd::SET_RAM_Y_RANGE,
            &[
                (y_start & 0xFF) as u8,
                ((y_start >> 8) & 0xFF) as u8,
                (y_end & 0xFF) as u8,
                ((y_end >> 8) & 0xFF) as u8,
            ],
        )
    }

    fn set_cursor(&mut self, x: u32, y: u32) -> Result<(), EpdError> {
        self.command_with_data(cmd::SET_RAM_X_COUNTER, &[(x & 0xFF) as u8])?;
        self.command_with_data(
            cmd::SET_RAM_Y_COUNTER,
            &[(y & 0xFF) as u8, ((y >> 8) & 0xFF) as u8],
        )
    }

    fn command_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), EpdError> {
        self.command(command)?;
        self.data(data)
    }

    fn command(&mut self, command: u8) -> Result<(), EpdError> {
        self.dc.set_low().map_err(EpdError::pin)?;
        self.spi.write(&[command]).map_err(EpdError::spi)
    }

    fn data(&mut self, data: &[u8]) -> Result<(), EpdError> {
        self.dc.set_high().map_err(EpdError::pin)?;
        self.spi.write(data).map_err(EpdError::spi)
    }
}
