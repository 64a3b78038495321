//! Presentation-level access: slide order, slide size and document metadata.

use super::shapes::{ImageBlob, Slide};
use super::slide_xml::parse_slide_shapes;
use crate::container::{attr_value, CoreProperties, OoxmlContainer};
use crate::detect::ensure_presentation;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const DEFAULT_MAIN_PART: &str = "ppt/presentation.xml";

/// Declared slide size (`p:sldSz`), in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

/// An opened PowerPoint package.
///
/// Slides are parsed on demand with [`Presentation::slide`]. The type is not
/// `Sync`, so every read goes through a single thread.
#[derive(Debug)]
pub struct Presentation {
    container: OoxmlContainer,
    slide_parts: Vec<String>,
    slide_size: Option<SlideSize>,
    properties: CoreProperties,
}

impl Presentation {
    /// Open a presentation from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut data = Vec::new();
        BufReader::new(file).read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a presentation from an in-memory package.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        ensure_presentation(&data)?;
        Self::from_container(OoxmlContainer::from_bytes(data)?)
    }

    fn from_container(container: OoxmlContainer) -> Result<Self> {
        let main_part = main_part_path(&container)?;
        let xml = container.read_xml(&main_part)?;
        let (slide_rel_ids, slide_size) = parse_presentation_xml(&xml)?;

        let rels = container.read_relationships(&main_part)?;
        let mut slide_parts = Vec::with_capacity(slide_rel_ids.len());
        for rel_id in &slide_rel_ids {
            match rels.get(rel_id) {
                Some(rel) => {
                    slide_parts.push(OoxmlContainer::resolve_path(&main_part, &rel.target))
                }
                None => log::warn!("Slide reference {} has no relationship, skipping", rel_id),
            }
        }

        let properties = container.core_properties();

        Ok(Self {
            container,
            slide_parts,
            slide_size,
            properties,
        })
    }

    /// Number of slides, in presentation order.
    pub fn slide_count(&self) -> usize {
        self.slide_parts.len()
    }

    /// Slide size declared by the document, if any.
    pub fn slide_size(&self) -> Option<SlideSize> {
        self.slide_size
    }

    /// Core document properties.
    pub fn properties(&self) -> &CoreProperties {
        &self.properties
    }

    /// Parse the slide at zero-based `index`.
    pub fn slide(&self, index: usize) -> Result<Slide> {
        let part_path = self.slide_parts.get(index).ok_or_else(|| {
            Error::InvalidData(format!(
                "slide index {} out of range ({} slides)",
                index,
                self.slide_parts.len()
            ))
        })?;

        let xml = self.container.read_xml(part_path)?;
        let shapes = parse_slide_shapes(&xml)?;
        let rels = self.container.read_relationships(part_path)?;

        Ok(Slide {
            index,
            part_path: part_path.clone(),
            shapes,
            rels,
        })
    }

    /// Read the media part a picture on `slide` points at.
    pub fn image_blob(&self, slide: &Slide, rel_id: &str) -> Result<ImageBlob> {
        let rel = slide.rels.get(rel_id).ok_or_else(|| {
            Error::MissingComponent(format!("{} relationship {}", slide.part_path, rel_id))
        })?;
        if rel.external {
            return Err(Error::InvalidData(format!(
                "linked image {} is not embedded in the package",
                rel.target
            )));
        }

        let path = OoxmlContainer::resolve_path(&slide.part_path, &rel.target);
        let bytes = self.container.read_binary(&path)?;
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        Ok(ImageBlob { bytes, ext })
    }
}

/// Locate the main presentation part through the package relationships.
fn main_part_path(container: &OoxmlContainer) -> Result<String> {
    let rels = container.read_relationships("")?;
    let main = rels
        .iter()
        .find(|rel| rel.rel_type.ends_with(OFFICE_DOCUMENT_REL))
        .map(|rel| OoxmlContainer::resolve_path("", &rel.target))
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());
    Ok(main)
}

/// The namespaced `r:id` of an element (as opposed to a plain `id`).
fn relationship_id(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id")
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Slide relationship IDs in order, plus the declared slide size.
fn parse_presentation_xml(xml: &str) -> Result<(Vec<String>, Option<SlideSize>)> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut rel_ids = Vec::new();
    let mut size = None;

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sldId" => {
                    if let Some(rel_id) = relationship_id(&e) {
                        rel_ids.push(rel_id);
                    }
                }
                b"sldSz" => {
                    let cx = attr_value(&e, b"cx").and_then(|v| v.parse().ok());
                    let cy = attr_value(&e, b"cy").and_then(|v| v.parse().ok());
                    if let (Some(cx), Some(cy)) = (cx, cy) {
                        size = Some(SlideSize { cx, cy });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok((rel_ids, size))
}
