//! Driver error type.
use std::fmt::Debug;

use thiserror::Error;

/// Failures while driving the panel.
#[derive(Error, Debug)]
pub enum EpdError {
    /// The SPI bus rejected a transfer.
    #[error("SPI error: {0}")]
    Spi(String),

    /// A DC, RST or BUSY line could not be read or driven.
    #[error("GPIO error: {0}")]
    Pin(String),

    /// BUSY stayed high longer than the configured limit (milliseconds).
    #[error("Panel stayed busy for {0} ms")]
    BusyTimeout(u32),

    /// Frame buffer length does not match the panel.
    #[error("Frame buffer has {actual} bytes, panel expects {expected}")]
    BufferSize {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}

impl EpdError {
    pub(crate) fn spi<E: Debug>(err: E) -> Self {
        EpdError::Spi(format!("{:?}", err))
    }

    pub(crate) fn pin<E: Debug>(err: E) -> Self {
        EpdError::Pin(format!("{:?}", err))
    }
}
