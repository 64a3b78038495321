//! Paragraph and text run records.

use serde::{Deserialize, Serialize};

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    /// Distributed (`dist`, `thaiDist`); rendered as justified text
    Distributed,
}

impl Alignment {
    /// Parse a DrawingML `algn` value.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "l" => Some(Alignment::Left),
            "ctr" => Some(Alignment::Center),
            "r" => Some(Alignment::Right),
            "just" | "justLow" => Some(Alignment::Justify),
            "dist" | "thaiDist" => Some(Alignment::Distributed),
            _ => None,
        }
    }

    /// CSS `text-align` value.
    pub fn css_value(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify | Alignment::Distributed => "justify",
        }
    }
}

/// A text run with resolved formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Literal text, possibly empty
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<f64>,

    #[serde(default)]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    /// Lowercase `#rrggbb`; `None` inherits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Link target, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
}

impl RunRecord {
    /// Create a plain run with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Make the run bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Make the run italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the hyperlink target.
    pub fn with_hyperlink(mut self, url: impl Into<String>) -> Self {
        self.hyperlink = Some(url.into());
        self
    }
}

/// A paragraph of a text frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    /// `None` when the paragraph declares no alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// Outline level (0 = top level)
    pub level: u32,

    /// Top-level paragraphs render as headings.
    pub is_title: bool,

    /// Runs in reading order
    pub runs: Vec<RunRecord>,
}

impl ParagraphRecord {
    /// Create a paragraph; `is_title` follows from the outline level.
    pub fn new(alignment: Option<Alignment>, level: u32, runs: Vec<RunRecord>) -> Self {
        Self {
            alignment,
            level,
            is_title: level == 0,
            runs,
        }
    }
}
