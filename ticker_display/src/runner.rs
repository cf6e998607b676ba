//! The update loop.
//!
//! A single "running" state: fetch → layout → render → present → sleep, forever.
//! Every iteration yields an [`IterationOutcome`]. A failed iteration is logged
//! and otherwise ignored; the next attempt happens after the normal interval,
//! with no backoff and no limit on consecutive failures.
use std::thread;
use std::time::Duration;

use log::{error, info};
use ticker_common::{DisplayError, Quote, Result};

use crate::fetcher::QuoteSource;
use crate::render::Renderer;
use crate::sink::OutputSink;

/// Result of one update.
#[derive(Debug)]
pub enum IterationOutcome {
    /// The frame for this quote reached the sink.
    Updated(Quote),
    /// Something in fetch, render or output failed.
    Failed(DisplayError),
}

impl IterationOutcome {
    /// Whether the frame was delivered.
    pub fn is_updated(&self) -> bool {
        matches!(self, IterationOutcome::Updated(_))
    }
}

/// Drives the source, renderer and sink.
pub struct Runner {
    source: Box<dyn QuoteSource>,
    sink: Box<dyn OutputSink>,
    renderer: Renderer,
    interval: Duration,
}

impl Runner {
    /// Wires the components together.
    pub fn new(
        source: Box<dyn QuoteSource>,
        sink: Box<dyn OutputSink>,
        renderer: Renderer,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            renderer,
            interval,
        }
    }

    /// Fetches, renders and presents one frame.
    pub fn update(&mut self) -> Result<Quote> {
        let quote = self.source.fetch()?;
        let canvas = self.renderer.render(&quote);
        self.sink.present(&canvas)?;
        Ok(quote)
    }

    /// Runs one update and logs its outcome. Never fails.
    pub fn run_once(&mut self) -> IterationOutcome {
        match self.update() {
            Ok(quote) => {
                info!(
                    "{} {} {} {} at {} -> {}",
                    quote.ticker_label(),
                    quote.price_label(),
                    quote.direction(),
                    quote.change_label(),
                    quote.timestamp_label(),
                    self.sink.name()
                );
                IterationOutcome::Updated(quote)
            }
            Err(e) => {
                error!("Error: {}", e);
                IterationOutcome::Failed(e)
            }
        }
    }

    /// Updates every `interval` until the process is killed.
    pub fn run_forever(&mut self) -> ! {
        info!(
            "Updating every {} s via {} sink",
            self.interval.as_secs(),
            self.sink.name()
        );
        loop {
            self.run_once();
            thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Pops one scripted result per fetch.
    struct ScriptedSource {
        script: RefCell<VecDeque<Result<Quote>>>,
    }

    impl QuoteSource for ScriptedSource {
        fn fetch(&self) -> Result<Quote> {
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(DisplayError::MissingData(String::from("script empty"))))
        }
    }

    struct RecordingSink {
        frames: Rc<RefCell<Vec<(u32, u32, usize)>>>,
    }

    impl OutputSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn present(&mut self, canvas: &Canvas) -> Result<()> {
            self.frames
                .borrow_mut()
                .push((canvas.width(), canvas.height(), canvas.ink_count()));
            Ok(())
        }
    }

    fn quote() -> Quote {
        let datetime = Quote::parse_datetime("2024-03-05 09:31:00").unwrap();
        Quote::from_closes("TSLA", datetime, 101.0, 100.0).unwrap()
    }

    fn runner(
        script: Vec<Result<Quote>>,
    ) -> (Runner, Rc<RefCell<Vec<(u32, u32, usize)>>>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let runner = Runner::new(
            Box::new(ScriptedSource {
                script: RefCell::new(script.into()),
            }),
            Box::new(RecordingSink {
                frames: frames.clone(),
            }),
            Renderer::default(),
            Duration::from_secs(120),
        );
        (runner, frames)
    }

    #[test]
    fn test_successful_iteration_presents_frame() {
        let (mut runner, frames) = runner(vec![Ok(quote())]);
        let outcome = runner.run_once();
        assert!(outcome.is_updated());
        let frames = frames.borrow();
        assert_eq!(frames.len(), 1);
        assert_eq!((frames[0].0, frames[0].1), (250, 122));
        assert!(frames[0].2 > 0);
    }

    #[test]
    fn test_fetch_error_skips_sink() {
        let (mut runner, frames) = runner(vec![Err(DisplayError::Api {
            code: None,
            message: String::from("error"),
        })]);
        match runner.run_once() {
            IterationOutcome::Failed(DisplayError::Api { .. }) => {}
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(frames.borrow().is_empty());
    }

    #[test]
    fn test_failure_does_not_stop_next_iteration() {
        let (mut runner, frames) = runner(vec![
            Err(DisplayError::MissingData(String::from("values"))),
            Ok(quote()),
        ]);
        assert!(!runner.run_once().is_updated());
        let outcome = runner.run_once();
        match outcome {
            IterationOutcome::Updated(q) => assert_eq!(q.symbol, "TSLA"),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(frames.borrow().len(), 1);
    }
}
