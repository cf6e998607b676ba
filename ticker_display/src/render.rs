//! Draws a computed [`Layout`] onto a [`Canvas`].
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;
use ticker_common::Quote;

use crate::canvas::Canvas;
use crate::font::FontSet;
use crate::layout::{Geometry, Layout, TextItem};

/// Composes frames for one canvas geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    geometry: Geometry,
    fonts: FontSet,
}

impl Renderer {
    /// Renderer for `geometry`.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            fonts: FontSet,
        }
    }

    /// Canvas geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Lays out and draws `quote` on a fresh canvas.
    pub fn render(&self, quote: &Quote) -> Canvas {
        let layout = Layout::compute(quote, &self.geometry, &self.fonts);
        let mut canvas = Canvas::new(self.geometry.width, self.geometry.height);
        self.draw(&layout, &mut canvas);
        canvas
    }

    /// Draws every element of `layout` onto `canvas`.
    pub fn draw(&self, layout: &Layout, canvas: &mut Canvas) {
        // The canvas never fails to draw.
        let _ = layout
            .panel
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(canvas);
        self.draw_text(&layout.ticker, canvas);
        self.draw_text(&layout.timestamp, canvas);
        self.draw_text(&layout.price, canvas);
        let _ = layout
            .indicator
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(canvas);
        self.draw_text(&layout.change, canvas);
    }

    fn draw_text(&self, item: &TextItem, canvas: &mut Canvas) {
        let _ = self
            .fonts
            .draw(&item.text, item.weight, item.size, item.origin, item.color, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: f64, previous: f64) -> Quote {
        let datetime = Quote::parse_datetime("2024-03-05 09:31:00").unwrap();
        Quote::from_closes("TSLA", datetime, price, previous).unwrap()
    }

    fn ink_in(canvas: &Canvas, x: std::ops::Range<u32>, y: std::ops::Range<u32>) -> usize {
        y.flat_map(|y| x.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.is_ink(x, y))
            .count()
    }

    #[test]
    fn test_frame_size() {
        let canvas = Renderer::default().render(&quote(251.3, 250.0));
        assert_eq!((canvas.width(), canvas.height()), (250, 122));
    }

    #[test]
    fn test_left_panel_is_mostly_black_with_white_ticker() {
        let canvas = Renderer::default().render(&quote(251.3, 250.0));
        let panel_pixels = 84 * 122;
        let black = ink_in(&canvas, 0..84, 0..122);
        assert!(black < panel_pixels, "ticker must punch white pixels");
        assert!(black > panel_pixels * 3 / 4);
        assert!(canvas.is_ink(0, 0));
        assert!(canvas.is_ink(83, 0));
        assert!(canvas.is_ink(83, 121));
        assert!(!canvas.is_ink(84, 0));
    }

    #[test]
    fn test_right_column_has_text_and_white_margins() {
        let canvas = Renderer::default().render(&quote(251.3, 250.0));
        assert!(ink_in(&canvas, 93..250, 14..30) > 0, "timestamp");
        assert!(ink_in(&canvas, 93..250, 32..75) > 0, "price");
        assert_eq!(ink_in(&canvas, 84..93, 0..122), 0, "column gap");
        assert_eq!(ink_in(&canvas, 93..250, 0..10), 0, "top margin");
    }

    #[test]
    fn test_indicator_drawn_for_both_directions() {
        let renderer = Renderer::default();
        for q in [quote(101.0, 100.0), quote(99.0, 100.0)] {
            let layout = Layout::compute(&q, renderer.geometry(), &FontSet);
            let canvas = renderer.render(&q);
            let bounds = layout.indicator.bounding_box();
            let x = bounds.top_left.x as u32;
            let y = bounds.top_left.y as u32;
            let ink = ink_in(
                &canvas,
                x..x + bounds.size.width,
                y..y + bounds.size.height,
            );
            assert!(ink > 0);
        }
    }
}
