//! Formatting metadata to inline CSS.

use crate::error::{Error, Result};
use crate::model::{FillColor, ParagraphRecord, RunRecord};
use crate::pptx::FillKind;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Parse a six-digit hex value such as `1F497D` (a leading `#` is accepted).
    pub fn parse(value: &str) -> Result<Self> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidData(format!("invalid RGB color '{}'", value)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| Error::InvalidData(format!("invalid RGB color '{}': {}", value, e)))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Resolve an optional explicit color; absence means inherit.
pub fn resolve_color(value: Option<&str>) -> Result<Option<String>> {
    value.map(|v| RgbColor::parse(v).map(|c| c.to_hex())).transpose()
}

/// Resolve a shape fill.
///
/// Only an explicit solid RGB fill gets a color and only `noFill` is
/// explicitly transparent; every other fill is left to the renderer default.
pub fn resolve_fill(fill: &FillKind) -> Option<FillColor> {
    match fill {
        FillKind::Solid { srgb: Some(value) } => match RgbColor::parse(value) {
            Ok(color) => Some(FillColor::Hex(color.to_hex())),
            Err(e) => {
                log::debug!("Ignoring shape fill: {}", e);
                None
            }
        },
        FillKind::Background => Some(FillColor::Transparent),
        _ => None,
    }
}

/// Inline style declarations for a run. Unset properties emit nothing.
pub fn run_style(run: &RunRecord) -> String {
    let mut style = String::new();
    if let Some(font) = &run.font_name {
        style.push_str(&format!("font-family: {};", escape_attr(font)));
    }
    if let Some(size) = run.font_size_pt {
        style.push_str(&format!("font-size: {}pt;", size));
    }
    if run.bold {
        style.push_str("font-weight: bold;");
    }
    if run.italic {
        style.push_str("font-style: italic;");
    }
    if let Some(color) = &run.color {
        style.push_str(&format!("color: {};", color));
    }
    style
}

/// Inline style declarations for a paragraph container.
pub fn paragraph_style(paragraph: &ParagraphRecord) -> String {
    match paragraph.alignment {
        Some(alignment) => format!("text-align: {};", alignment.css_value()),
        None => String::new(),
    }
}

/// Container element and CSS class of a paragraph.
pub fn paragraph_element(paragraph: &ParagraphRecord) -> (&'static str, &'static str) {
    if paragraph.is_title {
        ("h1", "title")
    } else {
        ("p", "paragraph")
    }
}

/// Escape text content for HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value placed inside a quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
