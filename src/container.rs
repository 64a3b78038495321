//! ZIP container abstraction for the PPTX package.
//!
//! The container keeps its archive behind a `RefCell`, so it is `Send` but not
//! `Sync`: a presentation can be read by exactly one thread at a time. The
//! pipeline relies on this to keep extraction strictly sequential.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read};

/// A relationship entry from a .rels file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative part path, or a URL for external targets)
    pub target: String,
    /// Whether the target lives outside the package (hyperlinks)
    pub external: bool,
}

/// Relationships of one package part, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create an empty relationship set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Add a relationship, replacing any previous entry with the same ID.
    pub fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Iterate over all relationships (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.by_id.values()
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Document properties from docProps/core.xml.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreProperties {
    /// dc:title
    pub title: Option<String>,
}

/// Read an attribute by local name (namespace prefix ignored).
pub(crate) fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local)
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

/// Rewrite the XML declaration after a UTF-16 payload has been decoded.
///
/// quick-xml honours the declared encoding, so a decoded string must not
/// still claim to be UTF-16.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if let Some(end_decl) = content.strip_prefix("<?xml").and_then(|_| content.find("?>")) {
        let (decl, rest) = content.split_at(end_decl + 2);
        let fixed = decl
            .replace("\"UTF-16\"", "\"UTF-8\"")
            .replace("'UTF-16'", "'UTF-8'")
            .replace("\"utf-16\"", "\"UTF-8\"")
            .replace("'utf-16'", "'UTF-8'");
        return format!("{}{}", fixed, rest);
    }
    content.to_string()
}

fn decode_utf16(bytes: &[u8], little_endian: bool) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| {
        if little_endian {
            u16::from_le_bytes([pair[0], pair[1]])
        } else {
            u16::from_be_bytes([pair[0], pair[1]])
        }
    });
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::InvalidData(format!("invalid UTF-16 in XML part: {}", e)))
}

/// Decode XML part bytes, honouring UTF-8 and UTF-16 byte order marks.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec())
            .map_err(|e| Error::InvalidData(format!("invalid UTF-8 in XML part: {}", e))),
        [0xFF, 0xFE, rest @ ..] => Ok(fix_xml_encoding_declaration(&decode_utf16(rest, true)?)),
        [0xFE, 0xFF, rest @ ..] => Ok(fix_xml_encoding_declaration(&decode_utf16(rest, false)?)),
        _ => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// PPTX package over a ZIP archive.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Create a container from an in-memory package.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read a binary part.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read an XML part as a string.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        decode_xml_bytes(&self.read_binary(path)?)
    }

    /// Read the relationships of a part (`dir/_rels/name.rels`).
    ///
    /// A part without a .rels file has no relationships; that is not an error.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = match part_path.rsplit_once('/') {
            Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
            None if part_path.is_empty() => "_rels/.rels".to_string(),
            None => format!("_rels/{}.rels", part_path),
        };

        match self.read_xml(&rels_path) {
            Ok(xml) => parse_relationships(&xml),
            Err(Error::MissingComponent(_)) => Ok(Relationships::new()),
            Err(e) => Err(e),
        }
    }

    /// Parse docProps/core.xml. Missing or unreadable properties yield defaults.
    pub fn core_properties(&self) -> CoreProperties {
        let mut props = CoreProperties::default();
        let Ok(xml) = self.read_xml("docProps/core.xml") else {
            return props;
        };

        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);
        let mut in_title = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => in_title = e.local_name().as_ref() == b"title",
                Ok(Event::Text(t)) if in_title => {
                    let text = t.unescape().unwrap_or_default().into_owned();
                    if !text.is_empty() {
                        props.title = Some(text);
                    }
                }
                Ok(Event::End(_)) => in_title = false,
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        props
    }

    /// Resolve a relationship target against the part that owns it.
    ///
    /// `ppt/slides/slide1.xml` + `../media/image1.png` → `ppt/media/image1.png`.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(absolute) = relative.strip_prefix('/') {
            return absolute.to_string();
        }

        let mut segments: Vec<&str> = match base.rsplit_once('/') {
            Some((dir, _)) => dir.split('/').collect(),
            None => Vec::new(),
        };
        for segment in relative.split('/') {
            match segment {
                ".." => {
                    segments.pop();
                }
                "." | "" => {}
                other => segments.push(other),
            }
        }
        segments.join("/")
    }
}

/// Parse the body of a .rels file.
fn parse_relationships(xml: &str) -> Result<Relationships> {
    let mut rels = Relationships::new();
    if xml.trim().is_empty() {
        return Ok(rels);
    }

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id").unwrap_or_default();
                if id.is_empty() {
                    continue;
                }
                rels.add(Relationship {
                    id,
                    rel_type: attr_value(&e, b"Type").unwrap_or_default(),
                    target: attr_value(&e, b"Target").unwrap_or_default(),
                    external: attr_value(&e, b"TargetMode")
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("external")),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok(rels)
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("parts", &self.archive.borrow().len())
            .finish()
    }
}
