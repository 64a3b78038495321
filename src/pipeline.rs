//! Parallel slide rendering with ordered reassembly.
//!
//! Slides are rendered on a dedicated rayon pool, one task per slide. Each
//! task sends its result tagged with the slide index over a channel; the
//! calling thread drains the channel into an index-keyed buffer and reads it
//! out in slide order once every task has reported.
//!
//! A panic inside one task is caught and turns that slide into an empty
//! fragment. Failing to start the pool is the only fatal error here.

use crate::error::Result;
use crate::model::{ShapeRecord, SlideResult};
use crate::render::{render_slide, ConvertOptions, RenderedSlide, ShapeFailure, SlideContext};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc;

/// Renders the records of one slide to HTML.
///
/// Implementations run concurrently on pool threads and must be `Sync`.
pub trait SlideRenderer: Sync {
    fn render(&self, shapes: &[ShapeRecord], ctx: &SlideContext<'_>) -> RenderedSlide;
}

/// The standard HTML renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl SlideRenderer for HtmlRenderer {
    fn render(&self, shapes: &[ShapeRecord], ctx: &SlideContext<'_>) -> RenderedSlide {
        render_slide(shapes, ctx)
    }
}

/// Progress notifications, delivered on the calling thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Extraction finished; `slides` slides will be rendered.
    Extracted { slides: usize },
    /// A slide finished rendering (in completion order).
    SlideRendered { index: usize },
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub slides_total: usize,
    pub slides_rendered: usize,
    /// Zero-based indices of slides whose task failed
    pub failed_slides: Vec<usize>,
    pub shapes_rendered: usize,
    pub images_written: usize,
    pub shape_failures: Vec<ShapeFailure>,
    /// Problems recovered during extraction
    pub extraction_warnings: usize,
}

impl ConversionReport {
    /// Number of slides rendered as empty because their task failed.
    pub fn slides_failed(&self) -> usize {
        self.failed_slides.len()
    }

    /// True when nothing had to be recovered.
    pub fn is_clean(&self) -> bool {
        self.failed_slides.is_empty()
            && self.shape_failures.is_empty()
            && self.extraction_warnings == 0
    }
}

/// Rendered slides in slide order, plus the run summary.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub slides: Vec<SlideResult>,
    pub report: ConversionReport,
}

/// Render all slides on a worker pool sized from `options`.
///
/// `asset_dir` must already exist when images are materialized.
pub fn render_slides<R: SlideRenderer>(
    slides: &[Vec<ShapeRecord>],
    asset_dir: &Path,
    options: &ConvertOptions,
    renderer: &R,
    mut progress: impl FnMut(ProgressEvent),
) -> Result<PipelineOutput> {
    let workers = options.worker_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("slide-render-{}", i))
        .build()?;

    log::info!("Rendering {} slides on {} workers", slides.len(), workers);

    let mut buffer: Vec<Option<RenderedSlide>> = (0..slides.len()).map(|_| None).collect();
    let canvas = options.canvas;
    let materialize_images = options.materialize_images;

    pool.in_place_scope(|scope| {
        let (tx, rx) = mpsc::channel::<(usize, Option<RenderedSlide>)>();

        for (index, shapes) in slides.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move |_| {
                let ctx = SlideContext {
                    index,
                    asset_dir,
                    canvas,
                    materialize_images,
                };
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| renderer.render(shapes, &ctx)));
                let rendered = match outcome {
                    Ok(rendered) => Some(rendered),
                    Err(payload) => {
                        log::error!(
                            "Rendering slide {} failed: {}",
                            index + 1,
                            panic_message(payload.as_ref())
                        );
                        None
                    }
                };
                // The receiver outlives every task in this scope.
                let _ = tx.send((index, rendered));
            });
        }
        drop(tx);

        for (index, rendered) in rx {
            buffer[index] = rendered;
            progress(ProgressEvent::SlideRendered { index });
        }
    });

    Ok(reassemble(buffer))
}

/// Read the buffer out in slide order. Empty slots become empty fragments.
fn reassemble(buffer: Vec<Option<RenderedSlide>>) -> PipelineOutput {
    let mut output = PipelineOutput::default();
    output.report.slides_total = buffer.len();

    for (index, slot) in buffer.into_iter().enumerate() {
        match slot {
            Some(rendered) => {
                output.report.slides_rendered += 1;
                output.report.shapes_rendered += rendered.shapes_rendered;
                output.report.images_written += rendered.images_written;
                output.report.shape_failures.extend(rendered.failures);
                output.slides.push(rendered.result);
            }
            None => {
                output.report.failed_slides.push(index);
                output.slides.push(SlideResult::empty(index));
            }
        }
    }

    output
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
