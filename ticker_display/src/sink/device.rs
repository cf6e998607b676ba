//! E-paper panel sink.
//!
//! The panel is opened fresh for every frame and put back to sleep before the
//! sink returns, so no handle outlives an update:
//! `open` → `init` → `clear` → `display` → `sleep`.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use epd2in13::{Epd2in13, EpdError};
use log::{info, warn};
use ticker_common::{DisplayError, Result};

use crate::canvas::Canvas;
use crate::sink::OutputSink;

/// Calls an e-paper controller must support for a full refresh.
pub trait EpaperPanel {
    /// Native width in pixels (portrait).
    fn width(&self) -> u32;
    /// Native height in pixels (portrait).
    fn height(&self) -> u32;
    /// Wakes and configures the controller.
    fn init(&mut self) -> Result<()>;
    /// Fills the panel with `pattern` and refreshes.
    fn clear(&mut self, pattern: u8) -> Result<()>;
    /// Pushes a packed frame and refreshes.
    fn display(&mut self, buffer: &[u8]) -> Result<()>;
    /// Enters deep sleep.
    fn sleep(&mut self) -> Result<()>;
}

fn panel_error(err: EpdError) -> DisplayError {
    DisplayError::Panel(err.to_string())
}

impl<SPI, DC, RST, BUSY, DELAY> EpaperPanel for Epd2in13<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    fn width(&self) -> u32 {
        epd2in13::WIDTH
    }

    fn height(&self) -> u32 {
        epd2in13::HEIGHT
    }

    fn init(&mut self) -> Result<()> {
        Epd2in13::init(self).map_err(panel_error)
    }

    fn clear(&mut self, pattern: u8) -> Result<()> {
        Epd2in13::clear(self, pattern).map_err(panel_error)
    }

    fn display(&mut self, buffer: &[u8]) -> Result<()> {
        Epd2in13::display(self, buffer).map_err(panel_error)
    }

    fn sleep(&mut self) -> Result<()> {
        Epd2in13::sleep(self).map_err(panel_error)
    }
}

/// Opens a panel for one update.
pub trait PanelFactory {
    /// Panel type produced.
    type Panel: EpaperPanel;

    /// Acquires the bus and lines.
    fn open(&mut self) -> Result<Self::Panel>;
}

impl<F, P> PanelFactory for F
where
    F: FnMut() -> Result<P>,
    P: EpaperPanel,
{
    type Panel = P;

    fn open(&mut self) -> Result<P> {
        self()
    }
}

/// Sink driving a physical panel.
pub struct DeviceSink<F> {
    factory: F,
}

impl<F: PanelFactory> DeviceSink<F> {
    /// Sink opening panels through `factory`.
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    fn refresh(panel: &mut F::Panel, buffer: &[u8]) -> Result<()> {
        panel.init()?;
        panel.clear(epd2in13::WHITE)?;
        panel.display(buffer)
    }
}

impl<F: PanelFactory> OutputSink for DeviceSink<F> {
    fn name(&self) -> &'static str {
        "device"
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        let mut panel = self.factory.open()?;
        let buffer = canvas.to_panel_buffer(panel.width(), panel.height())?;

        if let Err(e) = Self::refresh(&mut panel, &buffer) {
            // still try to park the controller
            if let Err(sleep_err) = panel.sleep() {
                warn!("Panel did not enter sleep after failed refresh: {}", sleep_err);
            }
            return Err(e);
        }
        panel.sleep()?;
        info!("Frame pushed to e-paper panel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Init,
        Clear(u8),
        Display(usize),
        Sleep,
    }

    struct FakePanel {
        calls: Rc<RefCell<Vec<Call>>>,
        fail_display: bool,
    }

    impl EpaperPanel for FakePanel {
        fn width(&self) -> u32 {
            122
        }
        fn height(&self) -> u32 {
            250
        }
        fn init(&mut self) -> Result<()> {
            self.calls.borrow_mut().push(Call::Init);
            Ok(())
        }
        fn clear(&mut self, pattern: u8) -> Result<()> {
            self.calls.borrow_mut().push(Call::Clear(pattern));
            Ok(())
        }
        fn display(&mut self, buffer: &[u8]) -> Result<()> {
            self.calls.borrow_mut().push(Call::Display(buffer.len()));
            if self.fail_display {
                return Err(DisplayError::Panel(String::from("bus fault")));
            }
            Ok(())
        }
        fn sleep(&mut self) -> Result<()> {
            self.calls.borrow_mut().push(Call::Sleep);
            Ok(())
        }
    }

    fn sink(
        calls: &Rc<RefCell<Vec<Call>>>,
        fail_display: bool,
    ) -> DeviceSink<impl FnMut() -> Result<FakePanel>> {
        let calls = calls.clone();
        DeviceSink::new(move || {
            Ok(FakePanel {
                calls: calls.clone(),
                fail_display,
            })
        })
    }

    #[test]
    fn test_full_update_sequence() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut sink = sink(&calls, false);
        sink.present(&Canvas::new(250, 122)).unwrap();
        assert_eq!(
            *calls.borrow(),
            vec![Call::Init, Call::Clear(0xFF), Call::Display(4000), Call::Sleep]
        );
    }

    #[test]
    fn test_panel_reopened_each_frame() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut sink = sink(&calls, false);
        sink.present(&Canvas::new(250, 122)).unwrap();
        sink.present(&Canvas::new(250, 122)).unwrap();
        let inits = calls.borrow().iter().filter(|c| **c == Call::Init).count();
        assert_eq!(inits, 2);
    }

    #[test]
    fn test_failed_display_still_sleeps() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut sink = sink(&calls, true);
        let err = sink.present(&Canvas::new(250, 122)).unwrap_err();
        assert!(matches!(err, DisplayError::Panel(_)));
        assert_eq!(calls.borrow().last(), Some(&Call::Sleep));
    }

    #[test]
    fn test_open_failure_touches_nothing() {
        let mut sink = DeviceSink::new(|| -> Result<FakePanel> {
            Err(DisplayError::Panel(String::from("no spidev")))
        });
        assert!(sink.present(&Canvas::new(250, 122)).is_err());
    }

    #[test]
    fn test_wrong_canvas_size_rejected_before_init() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut sink = sink(&calls, false);
        assert!(sink.present(&Canvas::new(10, 10)).is_err());
        assert!(calls.borrow().is_empty());
    }
}
