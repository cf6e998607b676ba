//! Scalable bitmap typefaces built on the embedded-graphics mono fonts.
//!
//! A string is rasterised with the closest native mono font and then scaled by
//! nearest neighbour to the requested pixel height. "Size" is the height of a
//! character cell in pixels, so size 28 text occupies a 28 pixel tall line.
//! Measurements are tight ink boxes relative to the top-left of the cell,
//! which is what the layout positions text with.
use std::convert::Infallible;

use embedded_graphics::mono_font::ascii::{
    FONT_6X10, FONT_6X13_BOLD, FONT_7X13, FONT_7X13_BOLD, FONT_7X14_BOLD, FONT_8X13_BOLD,
    FONT_9X15, FONT_9X15_BOLD, FONT_9X18, FONT_9X18_BOLD, FONT_10X20,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use strum_macros::Display;

use crate::layout::TextMeasure;

const MEDIUM: &[MonoFont<'static>] = &[FONT_6X10, FONT_7X13, FONT_9X15, FONT_9X18, FONT_10X20];
const SEMI_BOLD: &[MonoFont<'static>] = &[FONT_7X13_BOLD, FONT_8X13_BOLD, FONT_9X15_BOLD];
const BOLD: &[MonoFont<'static>] = &[FONT_6X13_BOLD, FONT_7X14_BOLD, FONT_9X15_BOLD, FONT_9X18_BOLD];

/// Stroke weight of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FontWeight {
    /// Timestamp line.
    Medium,
    /// Percent change line.
    SemiBold,
    /// Ticker and price.
    Bold,
}

impl FontWeight {
    /// Native fonts for this weight, ascending by cell height.
    fn base_fonts(self) -> &'static [MonoFont<'static>] {
        match self {
            FontWeight::Medium => MEDIUM,
            FontWeight::SemiBold => SEMI_BOLD,
            FontWeight::Bold => BOLD,
        }
    }

    /// Smallest native font at least `size` pixels tall, else the tallest one.
    fn base_font(self, size: u32) -> &'static MonoFont<'static> {
        let fonts = self.base_fonts();
        fonts
            .iter()
            .find(|font| font.character_size.height >= size)
            .unwrap_or(&fonts[fonts.len() - 1])
    }
}

/// One-bit raster of a rendered string; `true` is ink.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Raster {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` carries ink. Out of range reads as blank.
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Tight box around the inked pixels, or a zero rectangle when blank.
    pub fn ink_bounds(&self) -> Rectangle {
        let mut min = Point::new(i32::MAX, i32::MAX);
        let mut max = Point::new(i32::MIN, i32::MIN);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    min = min.component_min(Point::new(x as i32, y as i32));
                    max = max.component_max(Point::new(x as i32, y as i32));
                }
            }
        }
        if min.x > max.x {
            return Rectangle::zero();
        }
        Rectangle::with_corners(min, max)
    }

    /// Nearest-neighbour resample to `width × height`.
    fn scaled(&self, width: u32, height: u32) -> Raster {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut out = Raster::new(width, height);
        for y in 0..height {
            let sy = y * self.height / height;
            for x in 0..width {
                let sx = x * self.width / width;
                out.bits[(y * width + x) as usize] = self.get(sx, sy);
            }
        }
        out
    }

    /// Inked pixels translated to `origin`, in `color`.
    pub fn pixels(&self, origin: Point, color: BinaryColor) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                self.get(x, y)
                    .then(|| Pixel(origin + Point::new(x as i32, y as i32), color))
            })
        })
    }
}

impl OriginDimensions for Raster {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Raster {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 && color.is_on() {
                let (x, y) = (point.x as u32, point.y as u32);
                if x < self.width && y < self.height {
                    self.bits[(y * self.width + x) as usize] = true;
                }
            }
        }
        Ok(())
    }
}

/// Renders `text` with `weight` at `size` pixels into a raster.
pub fn rasterize(text: &str, weight: FontWeight, size: u32) -> Raster {
    let font = weight.base_font(size);
    let chars = text.chars().count() as u32;
    let cell = font.character_size;
    let native_width = chars * (cell.width + font.character_spacing);
    let mut native = Raster::new(native_width, cell.height);
    if chars > 0 {
        let style = MonoTextStyle::new(font, BinaryColor::On);
        // infallible target
        let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut native);
    }

    let size = size.max(1);
    let width = (native_width * size + cell.height / 2) / cell.height;
    native.scaled(width, size)
}

/// The three weights used on the panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontSet;

impl FontSet {
    /// Draws `text` with its cell's top-left at `origin` and returns the
    /// absolute ink box.
    pub fn draw<D>(
        &self,
        text: &str,
        weight: FontWeight,
        size: u32,
        origin: Point,
        color: BinaryColor,
        target: &mut D,
    ) -> Result<Rectangle, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let raster = rasterize(text, weight, size);
        target.draw_iter(raster.pixels(origin, color))?;
        let ink = raster.ink_bounds();
        Ok(Rectangle::new(ink.top_left + origin, ink.size))
    }
}

impl TextMeasure for FontSet {
    fn text_bounds(&self, text: &str, weight: FontWeight, size: u32) -> Rectangle {
        rasterize(text, weight, size).ink_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_font_selection() {
        assert_eq!(FontWeight::Medium.base_font(10).character_size.height, 10);
        assert_eq!(FontWeight::Medium.base_font(11).character_size.height, 13);
        assert_eq!(FontWeight::Bold.base_font(40).character_size.height, 18);
    }

    #[test]
    fn test_raster_height_matches_size() {
        for size in [10, 14, 18, 28, 40] {
            let raster = rasterize("$251.30", FontWeight::Bold, size);
            assert_eq!(raster.height(), size);
        }
    }

    #[test]
    fn test_ink_fits_inside_cell() {
        let raster = rasterize("TSLA", FontWeight::Bold, 28);
        let ink = raster.ink_bounds();
        assert!(ink.size.width > 0 && ink.size.height > 0);
        assert!(ink.top_left.x >= 0 && ink.top_left.y >= 0);
        assert!(ink.top_left.x as u32 + ink.size.width <= raster.width());
        assert!(ink.top_left.y as u32 + ink.size.height <= raster.height());
    }

    #[test]
    fn test_blank_text_has_zero_bounds() {
        assert_eq!(FontSet.text_bounds("", FontWeight::Medium, 10), Rectangle::zero());
        assert_eq!(FontSet.text_bounds("   ", FontWeight::Medium, 10), Rectangle::zero());
    }

    #[test]
    fn test_wider_with_size() {
        let small = FontSet.text_bounds("$251.30", FontWeight::Bold, 18);
        let large = FontSet.text_bounds("$251.30", FontWeight::Bold, 36);
        assert!(large.size.width > small.size.width);
    }

    #[test]
    fn test_draw_offsets_bounds_by_origin() {
        let mut raster = Raster::new(200, 60);
        let origin = Point::new(30, 12);
        let drawn = FontSet
            .draw("AB", FontWeight::Medium, 20, origin, BinaryColor::On, &mut raster)
            .unwrap();
        let local = FontSet.text_bounds("AB", FontWeight::Medium, 20);
        assert_eq!(drawn.top_left, local.top_left + origin);
        assert_eq!(drawn.size, local.size);
        assert_eq!(raster.ink_bounds(), drawn);
    }
}
