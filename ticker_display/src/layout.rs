//! Text placement on the 250×122 canvas.
//!
//! The canvas is split into a black left panel holding the ticker and a white
//! right panel holding three stacked lines: timestamp, price and percent change.
//! Every position is derived from measured ink boxes, so lines pack tightly
//! instead of following fixed line heights.
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, Triangle};
use log::{debug, warn};
use ticker_common::{Direction, Quote};

use crate::font::FontWeight;

/// Default lower bound of the font-size search.
pub const DEFAULT_MIN_SIZE: u32 = 10;
/// Default upper bound of the font-size search.
pub const DEFAULT_MAX_SIZE: u32 = 50;

const TICKER_SIZE: u32 = 28;
const TIMESTAMP_SIZE: u32 = 10;
const TIMESTAMP_Y: i32 = 14;
const PRICE_Y: i32 = 32;
const PRICE_MIN_SIZE: u32 = 18;
const PRICE_MAX_SIZE: u32 = 40;
/// Kept free at the right edge of the price line.
const PRICE_RIGHT_MARGIN: u32 = 10;
const CHANGE_SIZE: u32 = 14;
/// Gap between the price ink and the percent line.
const CHANGE_GAP: i32 = 8;
/// Gap between the left panel and the right column.
const COLUMN_GAP: u32 = 10;

/// Measures the ink box of a string.
pub trait TextMeasure {
    /// Tight ink box of `text` at `size`, relative to the top-left of its cell.
    fn text_bounds(&self, text: &str, weight: FontWeight, size: u32) -> Rectangle;
}

/// Largest size in `min_size..=max_size` whose ink width is at most `max_width`.
///
/// Scans downward from `max_size`; an exact fit is accepted. When nothing fits
/// the result is `min_size` and the text overflows.
pub fn optimal_font_size<M: TextMeasure>(
    measure: &M,
    text: &str,
    weight: FontWeight,
    max_width: u32,
    min_size: u32,
    max_size: u32,
) -> u32 {
    (min_size..=max_size)
        .rev()
        .find(|&size| measure.text_bounds(text, weight, size).size.width <= max_width)
        .unwrap_or(min_size)
}

/// Canvas dimensions and the split between the two panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Width of the inverted ticker panel.
    pub left_width: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: 250,
            height: 122,
            left_width: 83,
        }
    }
}

impl Geometry {
    /// Left edge of the right column.
    pub fn right_x(&self) -> i32 {
        (self.left_width + COLUMN_GAP) as i32
    }

    /// Width of the right column.
    pub fn right_width(&self) -> u32 {
        self.width.saturating_sub(self.left_width + COLUMN_GAP)
    }

    /// The inverted panel behind the ticker. Its right edge at `left_width` is
    /// inked too, so the panel is `left_width + 1` columns wide.
    pub fn left_panel(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.left_width + 1, self.height))
    }
}

/// One placed string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    /// Text to draw.
    pub text: String,
    /// Face weight.
    pub weight: FontWeight,
    /// Pixel size.
    pub size: u32,
    /// Top-left of the character cell.
    pub origin: Point,
    /// Expected absolute ink box.
    pub bounds: Rectangle,
    /// Ink color.
    pub color: BinaryColor,
}

impl TextItem {
    fn place<M: TextMeasure>(
        measure: &M,
        text: String,
        weight: FontWeight,
        size: u32,
        origin: Point,
        color: BinaryColor,
    ) -> Self {
        let ink = measure.text_bounds(&text, weight, size);
        Self {
            text,
            weight,
            size,
            origin,
            bounds: Rectangle::new(ink.top_left + origin, ink.size),
            color,
        }
    }

    /// First row below the ink.
    pub fn bottom(&self) -> i32 {
        self.bounds.top_left.y + self.bounds.size.height as i32
    }
}

/// Every element of one frame, in absolute canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Inverted panel behind the ticker.
    pub panel: Rectangle,
    /// Ticker, centred in the panel.
    pub ticker: TextItem,
    /// Human readable bar time.
    pub timestamp: TextItem,
    /// Latest price, sized to fill the column.
    pub price: TextItem,
    /// Up or down triangle before the percent change.
    pub indicator: Triangle,
    /// Direction the indicator shows.
    pub direction: Direction,
    /// Percent change.
    pub change: TextItem,
}

impl Layout {
    /// Places all elements for `quote`.
    pub fn compute<M: TextMeasure>(quote: &Quote, geometry: &Geometry, measure: &M) -> Self {
        let panel = geometry.left_panel();
        let ticker = Self::ticker(quote, geometry, measure);

        let right_x = geometry.right_x();
        let timestamp = TextItem::place(
            measure,
            quote.timestamp_label(),
            FontWeight::Medium,
            TIMESTAMP_SIZE,
            Point::new(right_x, TIMESTAMP_Y),
            BinaryColor::On,
        );

        let price_text = quote.price_label();
        let max_price_width = geometry.right_width().saturating_sub(PRICE_RIGHT_MARGIN);
        let price_size = optimal_font_size(
            measure,
            &price_text,
            FontWeight::Bold,
            max_price_width,
            PRICE_MIN_SIZE,
            PRICE_MAX_SIZE,
        );
        let price = TextItem::place(
            measure,
            price_text,
            FontWeight::Bold,
            price_size,
            Point::new(right_x, PRICE_Y),
            BinaryColor::On,
        );
        debug!("Price {} at size {}", price.text, price.size);
        if price.bounds.size.width > max_price_width {
            warn!(
                "Price {} is {} px wide at minimum size, column allows {} px",
                price.text, price.bounds.size.width, max_price_width
            );
        }

        let (indicator, direction, change) =
            Self::change_line(quote, right_x, price.bottom() + CHANGE_GAP, measure);

        Self {
            panel,
            ticker,
            timestamp,
            price,
            indicator,
            direction,
            change,
        }
    }

    /// Ticker centred on both axes of the left panel by its ink box.
    fn ticker<M: TextMeasure>(quote: &Quote, geometry: &Geometry, measure: &M) -> TextItem {
        let text = quote.ticker_label();
        let ink = measure.text_bounds(&text, FontWeight::Bold, TICKER_SIZE);
        let x = (geometry.left_width as i32 - ink.size.width as i32) / 2 - ink.top_left.x;
        let y = (geometry.height as i32 - ink.size.height as i32) / 2 - ink.top_left.y;
        TextItem::place(
            measure,
            text,
            FontWeight::Bold,
            TICKER_SIZE,
            Point::new(x, y),
            BinaryColor::Off,
        )
    }

    /// Triangle plus percent text, the triangle as tall as the text's ink.
    fn change_line<M: TextMeasure>(
        quote: &Quote,
        x: i32,
        y: i32,
        measure: &M,
    ) -> (Triangle, Direction, TextItem) {
        let text = quote.change_label();
        let direction = quote.direction();
        let ink = measure.text_bounds(&text, FontWeight::SemiBold, CHANGE_SIZE);
        let top = y + ink.top_left.y;
        let side = ink.size.height.max(1) as i32;
        let bottom = top + side - 1;
        let indicator = match direction {
            Direction::Up => Triangle::new(
                Point::new(x + side / 2, top),
                Point::new(x, bottom),
                Point::new(x + side - 1, bottom),
            ),
            Direction::Down => Triangle::new(
                Point::new(x, top),
                Point::new(x + side - 1, top),
                Point::new(x + side / 2, bottom),
            ),
        };
        // one space of the same face between glyph and text
        let gap = (CHANGE_SIZE / 3) as i32;
        let text_x = x + side + gap - ink.top_left.x;
        let change = TextItem::place(
            measure,
            text,
            FontWeight::SemiBold,
            CHANGE_SIZE,
            Point::new(text_x, y),
            BinaryColor::On,
        );
        (indicator, direction, change)
    }
}
