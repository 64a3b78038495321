//! Raw shape tree of a slide, as found in the slide XML.
//!
//! Nothing here is interpreted yet: run and paragraph properties are kept as
//! the attribute strings the package contains. Turning them into typed values
//! (and rejecting malformed ones) is the extractor's job.

use crate::container::Relationships;

/// Element kind of a top-level `p:spTree` child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeElement {
    /// `p:sp` (auto shape, text box, placeholder)
    AutoShape,
    /// `p:pic`
    Picture,
    /// `p:graphicFrame` (table, chart, diagram)
    GraphicFrame,
    /// `p:grpSp`
    Group,
    /// `p:cxnSp`
    Connector,
    /// `p:contentPart` (ink)
    ContentPart,
}

impl ShapeElement {
    /// Map a local element name to a shape kind.
    pub fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sp" => Some(ShapeElement::AutoShape),
            b"pic" => Some(ShapeElement::Picture),
            b"graphicFrame" => Some(ShapeElement::GraphicFrame),
            b"grpSp" => Some(ShapeElement::Group),
            b"cxnSp" => Some(ShapeElement::Connector),
            b"contentPart" => Some(ShapeElement::ContentPart),
            _ => None,
        }
    }
}

/// Offset and extent from `a:xfrm`, in EMUs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transform {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// Fill declared directly on a shape's `spPr`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FillKind {
    /// `a:solidFill`; `srgb` is set only for an explicit `a:srgbClr`
    Solid { srgb: Option<String> },
    /// `a:noFill`, i.e. the slide background shows through
    Background,
    Gradient,
    Pattern,
    Picture,
    Group,
    /// No fill element; inherited from layout or theme
    #[default]
    Unspecified,
}

/// A text run (`a:r`) with its raw `a:rPr` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRun {
    pub text: String,
    /// `@b`
    pub bold: Option<String>,
    /// `@i`
    pub italic: Option<String>,
    /// `@sz`, hundredths of a point
    pub size: Option<String>,
    /// `a:latin/@typeface`
    pub typeface: Option<String>,
    /// `a:solidFill/a:srgbClr/@val`
    pub color: Option<String>,
    /// `a:hlinkClick/@r:id`
    pub hyperlink_rel: Option<String>,
}

/// A paragraph (`a:p`) with its raw `a:pPr` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParagraph {
    /// `@lvl`
    pub level: Option<String>,
    /// `@algn`
    pub align: Option<String>,
    pub runs: Vec<RawRun>,
}

/// One top-level shape of a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawShape {
    pub element: ShapeElement,
    pub name: String,
    pub transform: Option<Transform>,
    pub fill: FillKind,
    /// Present iff the shape has a `txBody`
    pub text_body: Option<Vec<RawParagraph>>,
    /// `a:blip/@r:embed` of a picture
    pub blip_embed: Option<String>,
}

impl RawShape {
    pub(crate) fn new(element: ShapeElement) -> Self {
        Self {
            element,
            name: String::new(),
            transform: None,
            fill: FillKind::Unspecified,
            text_body: None,
            blip_embed: None,
        }
    }
}

/// A parsed slide: its shapes in document order plus its relationships.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Zero-based position in the presentation.
    pub index: usize,
    /// Package path of the slide part, e.g. `ppt/slides/slide1.xml`.
    pub part_path: String,
    pub shapes: Vec<RawShape>,
    pub(crate) rels: Relationships,
}

impl Slide {
    /// Target of a hyperlink relationship, verbatim.
    pub fn hyperlink_target(&self, rel_id: &str) -> Option<&str> {
        self.rels.get(rel_id).map(|rel| rel.target.as_str())
    }
}

/// Embedded image bytes and their format tag (lowercase file extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub ext: String,
}
