//! Shape records.

use super::ParagraphRecord;
use serde::{Deserialize, Serialize, Serializer};

/// Rendering category of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Picture,
    TextFrame,
    Other,
}

/// Position and size in EMUs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsEmu {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl BoundsEmu {
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Resolved background of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FillColor {
    /// Lowercase `#rrggbb`
    Hex(String),
    Transparent,
}

impl FillColor {
    /// CSS color value.
    pub fn css_value(&self) -> &str {
        match self {
            FillColor::Hex(hex) => hex,
            FillColor::Transparent => "transparent",
        }
    }
}

impl From<FillColor> for String {
    fn from(fill: FillColor) -> Self {
        fill.css_value().to_string()
    }
}

impl From<String> for FillColor {
    fn from(value: String) -> Self {
        if value == "transparent" {
            FillColor::Transparent
        } else {
            FillColor::Hex(value)
        }
    }
}

/// Embedded image bytes copied out of the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// Raw encoded bytes; serialized as their length only
    #[serde(
        rename = "byte_length",
        serialize_with = "serialize_byte_length",
        skip_deserializing
    )]
    pub bytes: Vec<u8>,

    /// Lowercase file extension of the media part (e.g. "png", "jpeg")
    pub format: String,
}

fn serialize_byte_length<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(bytes.len() as u64)
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            bytes,
            format: format.into(),
        }
    }
}

/// Kind-specific payload of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeContent {
    Picture { image: ImageData },
    TextFrame { paragraphs: Vec<ParagraphRecord> },
    Other,
}

impl ShapeContent {
    /// Rendering category of this payload.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeContent::Picture { .. } => ShapeKind::Picture,
            ShapeContent::TextFrame { .. } => ShapeKind::TextFrame,
            ShapeContent::Other => ShapeKind::Other,
        }
    }
}

/// One shape of a slide, in extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Shape name from the document (`cNvPr/@name`)
    pub name: String,

    pub bounds: BoundsEmu,

    /// `None` renders as transparent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<FillColor>,

    #[serde(flatten)]
    pub content: ShapeContent,
}

impl ShapeRecord {
    /// Rendering category of this shape.
    pub fn kind(&self) -> ShapeKind {
        self.content.kind()
    }

    /// Paragraphs of a text frame.
    pub fn paragraphs(&self) -> Option<&[ParagraphRecord]> {
        match &self.content {
            ShapeContent::TextFrame { paragraphs } => Some(paragraphs),
            _ => None,
        }
    }

    /// Image of a picture.
    pub fn image(&self) -> Option<&ImageData> {
        match &self.content {
            ShapeContent::Picture { image } => Some(image),
            _ => None,
        }
    }
}
