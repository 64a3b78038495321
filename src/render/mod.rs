//! HTML rendering of extracted slides.
//!
//! Rendering is a pure function of a slide's records plus a [`SlideContext`];
//! the only side effect is writing image files into the asset directory.
//!
//! # Example
//!
//! ```no_run
//! use pptx2html::render::{render_slide, Canvas, SlideContext};
//! use std::path::Path;
//!
//! let ctx = SlideContext {
//!     index: 0,
//!     asset_dir: Path::new("out/images"),
//!     canvas: Canvas::default(),
//!     materialize_images: true,
//! };
//! let rendered = render_slide(&[], &ctx);
//! assert!(rendered.result.html.is_empty());
//! ```

mod image;
mod json;
mod layout;
mod options;
mod shape;
mod style;

pub use self::image::{image_file_name, image_reference, materialize, IMAGE_DIR_NAME};
pub use json::{to_json, JsonFormat};
pub use layout::{format_percent, percent, PercentBox};
pub use options::{Canvas, ConvertOptions, DEFAULT_CANVAS_HEIGHT_EMU, DEFAULT_CANVAS_WIDTH_EMU};
pub use shape::{render_shape, render_slide, RenderedSlide, ShapeFailure, SlideContext};
pub use style::{
    escape_attr, escape_html, paragraph_element, paragraph_style, resolve_color, resolve_fill,
    run_style, RgbColor,
};
