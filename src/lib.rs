//! # pptx2html
//!
//! Convert PowerPoint presentations to a single, layout-faithful HTML page.
//!
//! Shapes are positioned in percentages of the slide canvas, text keeps its
//! run-level formatting, and embedded pictures are written as PNG files into
//! an `images/` directory next to the HTML file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pptx2html::{convert_file, ConvertOptions};
//!
//! let report = convert_file("deck.pptx", "out/deck.html", &ConvertOptions::default())?;
//! println!("{} of {} slides rendered", report.slides_rendered, report.slides_total);
//! # Ok::<(), pptx2html::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. [`pptx::Presentation`] reads the package (single-threaded).
//! 2. [`extract`] turns every slide into owned [`model::ShapeRecord`]s.
//! 3. [`pipeline`] renders slides in parallel and restores slide order.
//! 4. [`assemble`] wraps the fragments in the page template and writes it.

pub mod assemble;
pub mod container;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod pptx;
pub mod render;

// Re-exports
pub use container::{CoreProperties, OoxmlContainer, Relationship, Relationships};
pub use detect::{detect_package, PackageKind};
pub use error::{Error, Result};
pub use extract::{extract_presentation, Extraction};
pub use model::{
    Alignment, BoundsEmu, FillColor, ImageData, ParagraphRecord, RunRecord, ShapeContent,
    ShapeKind, ShapeRecord, SlideResult,
};
pub use pipeline::{ConversionReport, HtmlRenderer, ProgressEvent, SlideRenderer};
pub use pptx::Presentation;
pub use render::{Canvas, ConvertOptions, ShapeFailure};

use std::fs;
use std::path::Path;

const DEFAULT_TITLE: &str = "Presentation";

/// Convert a presentation file to HTML.
///
/// Images go to `images/` beside `output`. Recoverable problems are counted
/// in the returned report; an `Err` means no output was written.
///
/// # Example
///
/// ```no_run
/// use pptx2html::{convert_file, ConvertOptions};
///
/// let options = ConvertOptions::new().with_materialize_images(false);
/// let report = convert_file("deck.pptx", "deck.html", &options)?;
/// assert_eq!(report.images_written, 0);
/// # Ok::<(), pptx2html::Error>(())
/// ```
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    convert_file_with_progress(input, output, options, |_| {})
}

/// Like [`convert_file`], reporting progress through `progress`.
pub fn convert_file_with_progress(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
    progress: impl FnMut(ProgressEvent),
) -> Result<ConversionReport> {
    let input = input.as_ref();
    log::info!("Opening PowerPoint file: {}", input.display());
    let data = fs::read(input)?;
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned());
    convert(data, output.as_ref(), options, stem.as_deref(), progress)
}

/// Convert an in-memory presentation package to HTML.
pub fn convert_bytes(
    data: Vec<u8>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    convert(data, output.as_ref(), options, None, |_| {})
}

/// Open a presentation file and extract its shape records without rendering.
pub fn extract_file(input: impl AsRef<Path>) -> Result<Extraction> {
    let presentation = Presentation::open(input)?;
    Ok(extract_presentation(&presentation))
}

fn convert(
    data: Vec<u8>,
    output: &Path,
    options: &ConvertOptions,
    file_stem: Option<&str>,
    mut progress: impl FnMut(ProgressEvent),
) -> Result<ConversionReport> {
    let presentation = Presentation::from_bytes(data)?;
    warn_on_canvas_mismatch(&presentation, &options.canvas);

    log::info!("Extracting slide data...");
    let extraction = extract_presentation(&presentation);
    let title = page_title(options, presentation.properties(), file_stem);
    // Rendering never touches the document model.
    drop(presentation);

    log::info!(
        "Extracted {} slides ({} shapes)",
        extraction.slides.len(),
        extraction.shape_count()
    );
    progress(ProgressEvent::Extracted {
        slides: extraction.slides.len(),
    });

    let output_dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let asset_dir = output_dir.join(render::IMAGE_DIR_NAME);
    if options.materialize_images {
        fs::create_dir_all(&asset_dir)?;
    }

    let rendered = pipeline::render_slides(
        &extraction.slides,
        &asset_dir,
        options,
        &HtmlRenderer,
        &mut progress,
    )?;

    assemble::assemble(&rendered.slides, &title, output)?;

    let mut report = rendered.report;
    report.extraction_warnings = extraction.warnings;
    log::info!(
        "Done: {}/{} slides rendered, {} shape failures, {} images written",
        report.slides_rendered,
        report.slides_total,
        report.shape_failures.len(),
        report.images_written
    );
    Ok(report)
}

/// Page title: explicit option, then document title, then file name.
fn page_title(
    options: &ConvertOptions,
    properties: &CoreProperties,
    file_stem: Option<&str>,
) -> String {
    options
        .title
        .clone()
        .or_else(|| properties.title.clone())
        .or_else(|| file_stem.map(String::from))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Layout assumes the configured canvas; a different slide size is reported
/// but not corrected.
fn warn_on_canvas_mismatch(presentation: &Presentation, canvas: &Canvas) {
    if let Some(size) = presentation.slide_size() {
        if size.cx != canvas.width_emu() || size.cy != canvas.height_emu() {
            log::warn!(
                "Slide size {}x{} EMU differs from canvas {}x{} EMU; shapes will be placed proportionally off",
                size.cx,
                size.cy,
                canvas.width_emu(),
                canvas.height_emu()
            );
        }
    }
}
