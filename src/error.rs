//! Error types for the pptx2html library.

use std::io;
use thiserror::Error;

/// Result type alias for pptx2html operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a presentation.
///
/// Only some of these ever reach the caller of [`crate::convert_file`]:
/// per-shape and per-slide problems are recovered inside the pipeline and
/// show up in the [`crate::ConversionReport`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a PowerPoint (PPTX) package.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file is an Office package, but not a presentation.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required document component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// An embedded image could not be decoded or re-encoded.
    #[error("Image error: {0}")]
    Image(String),

    /// The rendering worker pool could not be started.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Error during rendering or serialization.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            other => Error::Image(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::WorkerPool(err.to_string())
    }
}
