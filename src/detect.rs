//! Input validation: make sure a file is a PowerPoint package before opening it.

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};
use std::io::{Cursor, Read};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
/// Macro-enabled decks and slide shows share the presentation part layout.
const PPTM_CONTENT_TYPE: &str = "application/vnd.ms-powerpoint.presentation.macroEnabled.main+xml";
const PPSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideshow.main+xml";
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Kind of Office Open XML package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Presentation,
    Document,
    Workbook,
}

impl PackageKind {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            PackageKind::Presentation => "PowerPoint Presentation",
            PackageKind::Document => "Word Document",
            PackageKind::Workbook => "Excel Workbook",
        }
    }
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Classify an in-memory package.
pub fn detect_package(data: &[u8]) -> Result<PackageKind> {
    if !is_zip_file(data) {
        return Err(Error::UnknownFormat);
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    if !archive.file_names().any(|n| n == "[Content_Types].xml") {
        // No content types: fall back to the top-level folder layout.
        return if archive.file_names().any(|n| n.starts_with("ppt/")) {
            Ok(PackageKind::Presentation)
        } else {
            Err(Error::MissingComponent("[Content_Types].xml".to_string()))
        };
    }

    let mut bytes = Vec::new();
    archive
        .by_name("[Content_Types].xml")?
        .read_to_end(&mut bytes)?;
    let content_types = decode_xml_bytes(&bytes)?;

    if [PPTX_CONTENT_TYPE, PPTM_CONTENT_TYPE, PPSX_CONTENT_TYPE]
        .iter()
        .any(|ct| content_types.contains(ct))
    {
        Ok(PackageKind::Presentation)
    } else if content_types.contains(DOCX_CONTENT_TYPE) {
        Ok(PackageKind::Document)
    } else if content_types.contains(XLSX_CONTENT_TYPE) {
        Ok(PackageKind::Workbook)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Fail unless `data` is a presentation package.
pub fn ensure_presentation(data: &[u8]) -> Result<()> {
    match detect_package(data)? {
        PackageKind::Presentation => Ok(()),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}
