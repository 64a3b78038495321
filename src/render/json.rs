//! JSON dump of the extracted slide records.

use crate::error::Result;
use crate::model::ShapeRecord;
use serde::Serialize;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

#[derive(Serialize)]
struct SlideEntry<'a> {
    index: usize,
    shapes: &'a [ShapeRecord],
}

/// Serialize per-slide shape records. Image bytes appear as their length.
pub fn to_json(slides: &[Vec<ShapeRecord>], format: JsonFormat) -> Result<String> {
    let entries: Vec<SlideEntry<'_>> = slides
        .iter()
        .enumerate()
        .map(|(index, shapes)| SlideEntry { index, shapes })
        .collect();

    let json = match format {
        JsonFormat::Compact => serde_json::to_string(&entries)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(&entries)?,
    };
    Ok(json)
}
