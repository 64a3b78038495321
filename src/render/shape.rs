//! Shape and slide HTML rendering.

use super::image::{image_reference, materialize};
use super::layout::PercentBox;
use super::options::Canvas;
use super::style::{
    escape_attr, escape_html, paragraph_element, paragraph_style, run_style,
};
use crate::model::{ImageData, ParagraphRecord, RunRecord, ShapeContent, ShapeRecord, SlideResult};
use std::fmt;
use std::path::Path;

/// Everything a slide render needs besides the shapes themselves.
#[derive(Debug, Clone, Copy)]
pub struct SlideContext<'a> {
    /// Zero-based slide position
    pub index: usize,
    /// Shared asset directory (already created)
    pub asset_dir: &'a Path,
    pub canvas: Canvas,
    pub materialize_images: bool,
}

/// A shape that could not be rendered and was replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeFailure {
    /// Zero-based slide position
    pub slide_index: usize,
    /// Zero-based shape position within the slide
    pub shape_index: usize,
    pub reason: String,
}

impl fmt::Display for ShapeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slide {}, shape {}: {}",
            self.slide_index + 1,
            self.shape_index + 1,
            self.reason
        )
    }
}

/// Output of rendering one slide.
#[derive(Debug, Clone, Default)]
pub struct RenderedSlide {
    pub result: SlideResult,
    /// Shapes that produced output without failing
    pub shapes_rendered: usize,
    pub images_written: usize,
    pub failures: Vec<ShapeFailure>,
}

/// Render every shape of a slide, in extraction order.
pub fn render_slide(shapes: &[ShapeRecord], ctx: &SlideContext<'_>) -> RenderedSlide {
    let mut rendered = RenderedSlide {
        result: SlideResult::empty(ctx.index),
        ..Default::default()
    };

    let mut html = String::new();
    for (shape_index, shape) in shapes.iter().enumerate() {
        html.push_str(&render_shape(shape, shape_index, ctx, &mut rendered));
    }
    rendered.result.html = html;
    rendered
}

/// Render one shape, recording its outcome in `rendered`.
pub fn render_shape(
    shape: &ShapeRecord,
    shape_index: usize,
    ctx: &SlideContext<'_>,
    rendered: &mut RenderedSlide,
) -> String {
    let position = PercentBox::from_bounds(&shape.bounds, &ctx.canvas).css();

    match &shape.content {
        ShapeContent::Picture { image } => {
            render_picture(image, &position, shape_index, ctx, rendered)
        }
        ShapeContent::TextFrame { paragraphs } => {
            rendered.shapes_rendered += 1;
            let background = shape
                .fill_color
                .as_ref()
                .map_or("transparent", |fill| fill.css_value());
            format!(
                "<div class='absolute flex flex-col items-start justify-start' style='{}background-color: {};'>{}</div>",
                position,
                escape_attr(background),
                render_paragraphs(paragraphs)
            )
        }
        ShapeContent::Other => String::new(),
    }
}

fn render_picture(
    image: &ImageData,
    position: &str,
    shape_index: usize,
    ctx: &SlideContext<'_>,
    rendered: &mut RenderedSlide,
) -> String {
    if ctx.materialize_images {
        match materialize(image, ctx.asset_dir, ctx.index, shape_index) {
            Ok(path) => {
                log::debug!("Wrote {}", path.display());
                rendered.images_written += 1;
            }
            Err(e) => {
                log::warn!(
                    "Failed to process image on slide {}, shape {}: {}",
                    ctx.index + 1,
                    shape_index + 1,
                    e
                );
                rendered.failures.push(ShapeFailure {
                    slide_index: ctx.index,
                    shape_index,
                    reason: e.to_string(),
                });
                return format!(
                    "<p class='absolute' style='{}'>[Image processing failed for slide {}, shape {}]</p>",
                    position,
                    ctx.index + 1,
                    shape_index + 1
                );
            }
        }
    }

    rendered.shapes_rendered += 1;
    format!(
        "<img src='{}' class='absolute object-contain' style='{}'/>",
        image_reference(ctx.index, shape_index),
        position
    )
}

fn render_paragraphs(paragraphs: &[ParagraphRecord]) -> String {
    let mut html = String::new();
    for paragraph in paragraphs {
        let (tag, class) = paragraph_element(paragraph);
        let content: String = paragraph.runs.iter().map(render_run).collect();
        html.push_str(&format!(
            "<{tag} class='{class}' style='{}'>{}</{tag}>",
            paragraph_style(paragraph),
            content
        ));
    }
    html
}

fn render_run(run: &RunRecord) -> String {
    let style = run_style(run);
    let text = escape_html(&run.text);
    match &run.hyperlink {
        Some(url) => format!(
            "<a href='{}' style='{}'>{}</a>",
            escape_attr(url),
            style,
            text
        ),
        None => format!("<span style='{}'>{}</span>", style, text),
    }
}
