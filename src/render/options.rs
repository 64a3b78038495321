//! Conversion options.

use crate::error::{Error, Result};

/// Width of the standard 10" x 7.5" slide, in EMUs.
pub const DEFAULT_CANVAS_WIDTH_EMU: i64 = 9_144_000;
/// Height of the standard 10" x 7.5" slide, in EMUs.
pub const DEFAULT_CANVAS_HEIGHT_EMU: i64 = 6_858_000;

/// Reference size that shape positions are expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    width_emu: i64,
    height_emu: i64,
}

impl Canvas {
    /// Create a canvas. Both dimensions must be positive.
    pub fn new(width_emu: i64, height_emu: i64) -> Result<Self> {
        if width_emu <= 0 || height_emu <= 0 {
            return Err(Error::InvalidData(format!(
                "canvas dimensions must be positive, got {}x{}",
                width_emu, height_emu
            )));
        }
        Ok(Self {
            width_emu,
            height_emu,
        })
    }

    pub fn width_emu(&self) -> i64 {
        self.width_emu
    }

    pub fn height_emu(&self) -> i64 {
        self.height_emu
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width_emu: DEFAULT_CANVAS_WIDTH_EMU,
            height_emu: DEFAULT_CANVAS_HEIGHT_EMU,
        }
    }
}

/// Options for converting a presentation to HTML.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Reference size for percentage layout
    pub canvas: Canvas,

    /// Write decoded images to the asset directory. When off, `<img>`
    /// references are still emitted but no files are written.
    pub materialize_images: bool,

    /// Worker pool size; `None` uses the available parallelism
    pub workers: Option<usize>,

    /// Page title override
    pub title: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            materialize_images: true,
            workers: None,
            title: None,
        }
    }
}

impl ConvertOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout reference canvas.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Enable or disable writing image files.
    pub fn with_materialize_images(mut self, materialize: bool) -> Self {
        self.materialize_images = materialize;
        self
    }

    /// Set the worker pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Effective number of rendering workers (at least 1).
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.max(1),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}
