//! Stock ticker for a 2.13" e-paper panel.
//!
//! Polls the quote provider, lays out ticker, price, change and time on a
//! 250×122 one-bit canvas, and sends the frame to the panel or a PNG file:
//!
//! - `args` / `config` — CLI parsing and the immutable `Config`.
//! - `fetcher` — `QuoteSource` and the HTTP client.
//! - `font` / `layout` — scalable bitmap text and placement, including the font-size search.
//! - `canvas` / `render` — the bitmap and drawing onto it.
//! - `sink` — PNG and e-paper destinations.
//! - `runner` — the never-ending update loop.
#![warn(missing_docs)]
pub mod args;
pub mod canvas;
pub mod config;
pub mod fetcher;
pub mod font;
pub mod layout;
pub mod render;
pub mod runner;
pub mod sink;
