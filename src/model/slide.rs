//! Per-slide rendering results.

use serde::{Deserialize, Serialize};

/// Rendered HTML of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideResult {
    /// Zero-based slide position
    pub index: usize,
    pub html: String,
}

impl SlideResult {
    pub fn new(index: usize, html: impl Into<String>) -> Self {
        Self {
            index,
            html: html.into(),
        }
    }

    /// Placeholder for a slide whose rendering failed.
    pub fn empty(index: usize) -> Self {
        Self::new(index, String::new())
    }
}
