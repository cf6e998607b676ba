//! Debug sink writing frames to a PNG file.
use std::path::{Path, PathBuf};

use log::info;
use ticker_common::Result;

use crate::canvas::Canvas;
use crate::sink::OutputSink;

/// Saves every frame to the same path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Sink writing to `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        canvas.save_png(&self.path)?;
        info!("Debug image saved to {}", self.path.display());
        Ok(())
    }
}
