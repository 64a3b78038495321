//! Synthetic PPTX packages for integration tests and benchmarks.
#![allow(dead_code)]

use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const CANVAS_WIDTH: i64 = 9_144_000;
pub const CANVAS_HEIGHT: i64 = 6_858_000;

const NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

/// One slide: its shape elements plus relationships and media it owns.
#[derive(Default)]
pub struct SlideSpec {
    shapes: Vec<String>,
    rels: Vec<String>,
    media: Vec<(String, Vec<u8>)>,
}

impl SlideSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text box with one paragraph per `(pPr attributes, runs)` entry;
    /// each run is `(rPr inner/attributes, text)`.
    pub fn text_box(
        mut self,
        name: &str,
        bounds: (i64, i64, i64, i64),
        fill: &str,
        paragraphs: &[(&str, &[(&str, &str)])],
    ) -> Self {
        let id = self.shapes.len() + 2;
        let mut body = String::new();
        for (ppr, runs) in paragraphs {
            body.push_str(&format!("<a:p><a:pPr {}/>", ppr));
            for (rpr, text) in *runs {
                body.push_str(&format!("<a:r>{}<a:t>{}</a:t></a:r>", rpr, text));
            }
            body.push_str("</a:p>");
        }
        self.shapes.push(format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom>{fill}</p:spPr><p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody></p:sp>"#,
            bounds.0, bounds.1, bounds.2, bounds.3
        ));
        self
    }

    /// Picture whose media part holds `bytes`.
    pub fn picture(mut self, name: &str, bounds: (i64, i64, i64, i64), media_name: &str, bytes: Vec<u8>) -> Self {
        let id = self.shapes.len() + 2;
        let rel_id = format!("rIdImg{}", self.rels.len() + 1);
        self.shapes.push(format!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="{name}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr></p:pic>"#,
            bounds.0, bounds.1, bounds.2, bounds.3
        ));
        self.rels.push(format!(
            r#"<Relationship Id="{rel_id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{media_name}"/>"#
        ));
        self.media.push((format!("ppt/media/{}", media_name), bytes));
        self
    }

    /// Auto shape with geometry and fill but no `txBody`.
    pub fn rectangle(mut self, name: &str, bounds: (i64, i64, i64, i64), fill: &str) -> Self {
        let id = self.shapes.len() + 2;
        self.shapes.push(format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom>{fill}</p:spPr></p:sp>"#,
            bounds.0, bounds.1, bounds.2, bounds.3
        ));
        self
    }

    /// Connector line: neither text nor picture.
    pub fn connector(mut self) -> Self {
        let id = self.shapes.len() + 2;
        self.shapes.push(format!(
            r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="{id}" name="Connector {id}"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm></p:spPr></p:cxnSp>"#
        ));
        self
    }

    /// External hyperlink relationship; `url` is XML-escaped into the rels part.
    pub fn hyperlink(mut self, rel_id: &str, url: &str) -> Self {
        let target = url.replace('&', "&amp;").replace('"', "&quot;");
        self.rels.push(format!(
            r#"<Relationship Id="{rel_id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{target}" TargetMode="External"/>"#
        ));
        self
    }

    fn xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {NAMESPACES}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
            self.shapes.concat()
        )
    }

    fn rels_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            self.rels.concat()
        )
    }
}

fn put<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, data: &[u8]) {
    zip.start_file(name, SimpleFileOptions::default()).unwrap();
    zip.write_all(data).unwrap();
}

/// Build a complete .pptx package.
pub fn build_pptx(slides: &[SlideSpec], title: Option<&str>) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let mut overrides = String::from(
        r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#,
    );
    for i in 1..=slides.len() {
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
    }
    put(
        &mut zip,
        "[Content_Types].xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>{overrides}</Types>"#
        )
        .as_bytes(),
    );

    put(
        &mut zip,
        "_rels/.rels",
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#,
    );

    if let Some(title) = title {
        put(
            &mut zip,
            "docProps/core.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{title}</dc:title></cp:coreProperties>"#
            )
            .as_bytes(),
        );
    }

    let mut slide_ids = String::new();
    let mut pres_rels = String::new();
    for i in 1..=slides.len() {
        slide_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, i + 1));
        pres_rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{i}.xml"/>"#,
            i + 1
        ));
    }
    put(
        &mut zip,
        "ppt/presentation.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {NAMESPACES}><p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="{CANVAS_WIDTH}" cy="{CANVAS_HEIGHT}"/></p:presentation>"#
        )
        .as_bytes(),
    );
    put(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{pres_rels}</Relationships>"#
        )
        .as_bytes(),
    );

    for (i, slide) in slides.iter().enumerate() {
        let n = i + 1;
        put(&mut zip, &format!("ppt/slides/slide{n}.xml"), slide.xml().as_bytes());
        put(
            &mut zip,
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            slide.rels_xml().as_bytes(),
        );
        for (path, bytes) in &slide.media {
            put(&mut zip, path, bytes);
        }
    }

    zip.finish().unwrap();
    buffer
}

/// A small valid PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
    buffer.into_inner()
}
