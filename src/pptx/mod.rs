//! PPTX (PowerPoint) document model.
//!
//! This module reads a presentation package into plain values: the slide
//! list, each slide's top-level shapes with their raw formatting attributes,
//! and embedded media on request.

mod presentation;
mod shapes;
mod slide_xml;

pub use presentation::{Presentation, SlideSize};
pub use shapes::{
    FillKind, ImageBlob, RawParagraph, RawRun, RawShape, ShapeElement, Slide, Transform,
};
pub use slide_xml::parse_slide_shapes;
