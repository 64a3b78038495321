//! Slide data extraction: document model to immutable shape records.
//!
//! Extraction runs on the thread that owns the [`Presentation`] and finishes
//! before any rendering starts. Image bytes are copied out here so that the
//! records are self-contained.

use crate::error::{Error, Result};
use crate::model::{
    Alignment, BoundsEmu, ImageData, ParagraphRecord, RunRecord, ShapeContent, ShapeRecord,
};
use crate::pptx::{Presentation, RawParagraph, RawRun, RawShape, ShapeElement, Slide};
use crate::render::{resolve_color, resolve_fill};

/// Shape records of every slide, in document order.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub slides: Vec<Vec<ShapeRecord>>,
    /// Recovered problems (malformed formatting, unreadable slides or media)
    pub warnings: usize,
}

impl Extraction {
    /// Total number of shapes across all slides.
    pub fn shape_count(&self) -> usize {
        self.slides.iter().map(Vec::len).sum()
    }
}

/// Extract every slide of `presentation`.
///
/// Problems confined to one slide or shape are logged and counted; the
/// affected slide or text frame comes back empty.
pub fn extract_presentation(presentation: &Presentation) -> Extraction {
    let mut extraction = Extraction::default();

    for index in 0..presentation.slide_count() {
        let shapes = match presentation.slide(index) {
            Ok(slide) => extract_slide(presentation, &slide, &mut extraction.warnings),
            Err(e) => {
                log::warn!("Failed to read slide {}: {}", index + 1, e);
                extraction.warnings += 1;
                Vec::new()
            }
        };
        extraction.slides.push(shapes);
    }

    extraction
}

/// Convert one parsed slide into shape records.
pub fn extract_slide(
    presentation: &Presentation,
    slide: &Slide,
    warnings: &mut usize,
) -> Vec<ShapeRecord> {
    slide
        .shapes
        .iter()
        .enumerate()
        .map(|(shape_index, raw)| extract_shape(presentation, slide, shape_index, raw, warnings))
        .collect()
}

fn extract_shape(
    presentation: &Presentation,
    slide: &Slide,
    shape_index: usize,
    raw: &RawShape,
    warnings: &mut usize,
) -> ShapeRecord {
    let bounds = match raw.transform {
        Some(t) => BoundsEmu::new(t.x, t.y, t.cx, t.cy),
        None => {
            log::debug!(
                "Slide {}, shape {} ('{}') has no geometry, placing at origin",
                slide.index + 1,
                shape_index + 1,
                raw.name
            );
            BoundsEmu::default()
        }
    };

    let content = match (&raw.element, &raw.blip_embed) {
        (ShapeElement::Picture, Some(rel_id)) => {
            let image = match presentation.image_blob(slide, rel_id) {
                Ok(blob) => ImageData::new(blob.bytes, blob.ext),
                Err(e) => {
                    log::warn!(
                        "Failed to read image of slide {}, shape {}: {}",
                        slide.index + 1,
                        shape_index + 1,
                        e
                    );
                    *warnings += 1;
                    ImageData::default()
                }
            };
            ShapeContent::Picture { image }
        }
        _ => text_content(slide, shape_index, raw, warnings),
    };

    log::debug!(
        "Slide {}, shape {} ('{}'): {:?} -> {:?}",
        slide.index + 1,
        shape_index + 1,
        raw.name,
        raw.element,
        content.kind()
    );

    ShapeRecord {
        name: raw.name.clone(),
        bounds,
        fill_color: resolve_fill(&raw.fill),
        content,
    }
}

/// Content of a shape that is not a linked picture.
///
/// Every auto shape has a text frame, even one without a `txBody`.
fn text_content(
    slide: &Slide,
    shape_index: usize,
    raw: &RawShape,
    warnings: &mut usize,
) -> ShapeContent {
    match (&raw.element, &raw.text_body) {
        (ShapeElement::Picture, _) => ShapeContent::Other,
        (_, Some(body)) => {
            let paragraphs = match extract_paragraphs(body, slide) {
                Ok(paragraphs) => paragraphs,
                Err(e) => {
                    log::warn!(
                        "Malformed text formatting on slide {}, shape {}: {}",
                        slide.index + 1,
                        shape_index + 1,
                        e
                    );
                    *warnings += 1;
                    Vec::new()
                }
            };
            ShapeContent::TextFrame { paragraphs }
        }
        (ShapeElement::AutoShape, None) => ShapeContent::TextFrame {
            paragraphs: Vec::new(),
        },
        _ => ShapeContent::Other,
    }
}

/// Interpret the raw paragraphs of a text body.
pub fn extract_paragraphs(body: &[RawParagraph], slide: &Slide) -> Result<Vec<ParagraphRecord>> {
    body.iter()
        .map(|raw| {
            let level = match raw.level.as_deref() {
                Some(value) => value
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidData(format!("invalid outline level '{}'", value)))?,
                None => 0,
            };
            let alignment = match raw.align.as_deref() {
                Some(value) => Some(Alignment::from_ooxml(value).ok_or_else(|| {
                    Error::InvalidData(format!("unknown alignment '{}'", value))
                })?),
                None => None,
            };
            let runs = raw
                .runs
                .iter()
                .map(|run| extract_run(run, slide))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParagraphRecord::new(alignment, level, runs))
        })
        .collect()
}

fn extract_run(raw: &RawRun, slide: &Slide) -> Result<RunRecord> {
    let font_size_pt = match raw.size.as_deref() {
        Some(value) => {
            let hundredths = value
                .parse::<u32>()
                .ok()
                .filter(|&sz| sz > 0)
                .ok_or_else(|| Error::InvalidData(format!("invalid font size '{}'", value)))?;
            Some(f64::from(hundredths) / 100.0)
        }
        None => None,
    };

    let hyperlink = raw.hyperlink_rel.as_deref().and_then(|rel_id| {
        let target = slide.hyperlink_target(rel_id);
        if target.is_none() {
            log::debug!("Hyperlink {} on slide {} has no target", rel_id, slide.index + 1);
        }
        target.map(String::from)
    });

    Ok(RunRecord {
        text: raw.text.clone(),
        font_name: raw.typeface.clone().filter(|name| !name.is_empty()),
        font_size_pt,
        bold: parse_flag(raw.bold.as_deref())?,
        italic: parse_flag(raw.italic.as_deref())?,
        color: resolve_color(raw.color.as_deref())?,
        hyperlink,
    })
}

/// Parse an `xsd:boolean` attribute; absent means false.
fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(other) => Err(Error::InvalidData(format!("invalid boolean '{}'", other))),
    }
}
