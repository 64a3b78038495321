//! Intermediate representation of a presentation.
//!
//! The extractor builds these records once from the document model. They are
//! plain owned values: nothing downstream mutates them, and each slide's
//! records can be handed to a worker thread as-is.

mod paragraph;
mod shape;
mod slide;

pub use paragraph::*;
pub use shape::*;
pub use slide::*;
