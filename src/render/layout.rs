//! Absolute EMU geometry to canvas percentages.
//!
//! Values are not clamped: a shape hanging off the canvas yields negative or
//! greater-than-100 percentages, exactly as authored.

use super::options::Canvas;
use crate::model::BoundsEmu;

/// Percentage of `reference` that `value` represents.
pub fn percent(value: i64, reference: i64) -> f64 {
    value as f64 / reference as f64 * 100.0
}

/// Format a percentage with two decimals, e.g. `12.50%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// A shape box relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentBox {
    /// Normalize EMU bounds against a canvas.
    pub fn from_bounds(bounds: &BoundsEmu, canvas: &Canvas) -> Self {
        Self {
            left: percent(bounds.left, canvas.width_emu()),
            top: percent(bounds.top, canvas.height_emu()),
            width: percent(bounds.width, canvas.width_emu()),
            height: percent(bounds.height, canvas.height_emu()),
        }
    }

    /// Inline CSS positioning declarations.
    pub fn css(&self) -> String {
        format!(
            "left:{};top:{};width:{};height:{};",
            format_percent(self.left),
            format_percent(self.top),
            format_percent(self.width),
            format_percent(self.height)
        )
    }
}
