//! One-bit canvas the frame is composed on.
//!
//! `BinaryColor::On` is ink (black) and `BinaryColor::Off` is paper (white).
//! The canvas is landscape; the panel buffer is produced by rotating it into
//! the controller's portrait RAM layout.
use std::convert::Infallible;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use ticker_common::{DisplayError, Result};

/// Landscape 1-bit bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl Canvas {
    /// Blank (white) canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![false; (width * height) as usize],
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is black. Out of range reads as white.
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.ink[(y * self.width + x) as usize]
    }

    /// Number of black pixels.
    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&ink| ink).count()
    }

    /// Packs rows MSB first with `1` = white, padding each row to whole bytes.
    fn pack_rows<F>(width: u32, height: u32, is_ink: F) -> Vec<u8>
    where
        F: Fn(u32, u32) -> bool,
    {
        let line_bytes = width.div_ceil(8) as usize;
        let mut packed = vec![0xFF; line_bytes * height as usize];
        for y in 0..height {
            for x in 0..width {
                if is_ink(x, y) {
                    packed[y as usize * line_bytes + (x / 8) as usize] &= !(0x80 >> (x % 8));
                }
            }
        }
        packed
    }

    /// Encodes the canvas as a grayscale PNG with bit depth 1.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::One);
        let mut writer = encoder.write_header()?;
        let data = Self::pack_rows(self.width, self.height, |x, y| self.is_ink(x, y));
        writer.write_image_data(&data)?;
        writer.finish()?;
        Ok(())
    }

    /// Writes the PNG to `path`, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_png(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Frame in the panel's native `panel_width × panel_height` layout.
    ///
    /// A landscape canvas (`width == panel_height`) is rotated 90° counter-clockwise
    /// first; a canvas already in portrait is packed as is.
    pub fn to_panel_buffer(&self, panel_width: u32, panel_height: u32) -> Result<Vec<u8>> {
        if self.width == panel_height && self.height == panel_width {
            let last_column = self.width - 1;
            Ok(Self::pack_rows(panel_width, panel_height, |x, y| {
                self.is_ink(last_column - y, x)
            }))
        } else if self.width == panel_width && self.height == panel_height {
            Ok(Self::pack_rows(panel_width, panel_height, |x, y| self.is_ink(x, y)))
        } else {
            Err(DisplayError::Panel(format!(
                "canvas {}x{} does not fit a {}x{} panel",
                self.width, self.height, panel_width, panel_height
            )))
        }
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                self.ink[(y * self.width + x) as usize] = color.is_on();
            }
        }
        Ok(())
    }
}
