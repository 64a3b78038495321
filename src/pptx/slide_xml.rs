//! Slide XML → raw shape tree.
//!
//! Only top-level children of `p:spTree` become shapes; the contents of group
//! shapes and table cells are not descended into.

use super::shapes::{FillKind, RawParagraph, RawRun, RawShape, ShapeElement, Transform};
use crate::container::attr_value;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};

/// Parse the shapes of one slide part.
pub fn parse_slide_shapes(xml: &str) -> Result<Vec<RawShape>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    // Don't trim text - preserve whitespace from xml:space="preserve" elements
    reader.config_mut().trim_text(false);

    let mut parser = SlideParser::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                parser.open(&e);
                parser.stack.push(e.local_name().as_ref().to_vec());
            }
            Ok(Event::Empty(e)) => {
                parser.open(&e);
                parser.close(e.local_name().as_ref());
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::XmlParse(e.to_string()))?;
                parser.text(&text);
            }
            Ok(Event::CData(c)) => {
                let text = String::from_utf8_lossy(&c).into_owned();
                parser.text(&text);
            }
            Ok(Event::End(e)) => {
                parser.stack.pop();
                parser.close(e.local_name().as_ref());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok(parser.shapes)
}

#[derive(Debug, Default)]
struct Geometry {
    x: Option<i64>,
    y: Option<i64>,
    cx: Option<i64>,
    cy: Option<i64>,
}

impl Geometry {
    fn transform(&self) -> Option<Transform> {
        Some(Transform {
            x: self.x?,
            y: self.y?,
            cx: self.cx?,
            cy: self.cy?,
        })
    }
}

#[derive(Debug)]
struct ShapeBuilder {
    shape: RawShape,
    geometry: Geometry,
    paragraph: Option<RawParagraph>,
    run: Option<RawRun>,
    /// Stack depth of the shape element itself.
    depth: usize,
}

#[derive(Debug, Default)]
struct SlideParser {
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    /// Depth of the `spTree` element, once seen.
    tree_depth: Option<usize>,
    current: Option<ShapeBuilder>,
    shapes: Vec<RawShape>,
}

fn parse_emu(e: &BytesStart<'_>, key: &[u8]) -> Option<i64> {
    let raw = attr_value(e, key)?;
    match raw.trim().parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::debug!(
                "ignoring non-numeric geometry {}=\"{}\"",
                String::from_utf8_lossy(key),
                raw
            );
            None
        }
    }
}

impl SlideParser {
    /// Name of the ancestor `n` levels up (0 = parent of the element being opened).
    fn ancestor(&self, n: usize) -> Option<&[u8]> {
        let len = self.stack.len();
        len.checked_sub(n + 1).map(|i| self.stack[i].as_slice())
    }

    fn open(&mut self, e: &BytesStart<'_>) {
        let local = e.local_name();
        let name = local.as_ref();
        let depth = self.stack.len();

        if self.current.is_none() {
            if name == b"spTree" && self.tree_depth.is_none() {
                self.tree_depth = Some(depth);
            } else if self.tree_depth.is_some_and(|d| depth == d + 1) {
                if let Some(element) = ShapeElement::from_local_name(name) {
                    self.current = Some(ShapeBuilder {
                        shape: RawShape::new(element),
                        geometry: Geometry::default(),
                        paragraph: None,
                        run: None,
                        depth,
                    });
                }
            }
            return;
        }

        let parent = self.ancestor(0).map(<[u8]>::to_vec);
        let grandparent = self.ancestor(1).map(<[u8]>::to_vec);
        let Some(builder) = self.current.as_mut() else {
            return;
        };
        // 0 = direct child of the shape element
        let rel = depth - builder.depth - 1;
        let parent = parent.as_deref();
        let grandparent = grandparent.as_deref();

        match name {
            b"cNvPr" if rel == 1 => {
                builder.shape.name = attr_value(e, b"name").unwrap_or_default();
            }
            b"off" if matches!(parent, Some(b"xfrm")) && rel <= 2 => {
                builder.geometry.x = parse_emu(e, b"x");
                builder.geometry.y = parse_emu(e, b"y");
            }
            b"ext" if matches!(parent, Some(b"xfrm")) && rel <= 2 => {
                builder.geometry.cx = parse_emu(e, b"cx");
                builder.geometry.cy = parse_emu(e, b"cy");
            }
            b"solidFill" | b"noFill" | b"gradFill" | b"pattFill" | b"blipFill" | b"grpFill"
                if rel == 1 && matches!(parent, Some(b"spPr") | Some(b"grpSpPr")) =>
            {
                builder.shape.fill = match name {
                    b"solidFill" => FillKind::Solid { srgb: None },
                    b"noFill" => FillKind::Background,
                    b"gradFill" => FillKind::Gradient,
                    b"pattFill" => FillKind::Pattern,
                    b"blipFill" => FillKind::Picture,
                    _ => FillKind::Group,
                };
            }
            b"srgbClr"
                if rel == 2
                    && matches!(parent, Some(b"solidFill"))
                    && matches!(grandparent, Some(b"spPr")) =>
            {
                builder.shape.fill = FillKind::Solid {
                    srgb: attr_value(e, b"val"),
                };
            }
            b"blip" if rel == 1 && matches!(parent, Some(b"blipFill")) => {
                builder.shape.blip_embed = attr_value(e, b"embed");
            }
            b"txBody" if rel == 0 => {
                builder.shape.text_body = Some(Vec::new());
            }
            b"p" if rel == 1 && matches!(parent, Some(b"txBody")) => {
                builder.paragraph = Some(RawParagraph::default());
            }
            b"pPr" if matches!(parent, Some(b"p")) => {
                if let Some(paragraph) = builder.paragraph.as_mut() {
                    paragraph.level = attr_value(e, b"lvl");
                    paragraph.align = attr_value(e, b"algn");
                }
            }
            b"r" if matches!(parent, Some(b"p")) && builder.paragraph.is_some() => {
                builder.run = Some(RawRun::default());
            }
            b"rPr" if matches!(parent, Some(b"r")) => {
                if let Some(run) = builder.run.as_mut() {
                    run.bold = attr_value(e, b"b");
                    run.italic = attr_value(e, b"i");
                    run.size = attr_value(e, b"sz");
                }
            }
            b"latin" if matches!(parent, Some(b"rPr")) => {
                if let Some(run) = builder.run.as_mut() {
                    run.typeface = attr_value(e, b"typeface");
                }
            }
            b"srgbClr"
                if matches!(parent, Some(b"solidFill")) && matches!(grandparent, Some(b"rPr")) =>
            {
                if let Some(run) = builder.run.as_mut() {
                    run.color = attr_value(e, b"val");
                }
            }
            b"hlinkClick" if matches!(parent, Some(b"rPr")) => {
                if let Some(run) = builder.run.as_mut() {
                    run.hyperlink_rel = attr_value(e, b"id").filter(|id| !id.is_empty());
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !matches!(self.ancestor(0), Some(b"t")) || !matches!(self.ancestor(1), Some(b"r")) {
            return;
        }
        if let Some(run) = self.current.as_mut().and_then(|b| b.run.as_mut()) {
            run.text.push_str(text);
        }
    }

    /// Called with the stack already popped past `name`.
    fn close(&mut self, name: &[u8]) {
        let depth = self.stack.len();
        let Some(builder) = self.current.as_mut() else {
            if self.tree_depth == Some(depth) && name == b"spTree" {
                self.tree_depth = None;
            }
            return;
        };

        if depth == builder.depth {
            if let Some(mut done) = self.current.take() {
                done.shape.transform = done.geometry.transform();
                self.shapes.push(done.shape);
            }
            return;
        }

        match name {
            b"r" => {
                if let (Some(run), Some(paragraph)) = (builder.run.take(), builder.paragraph.as_mut()) {
                    paragraph.runs.push(run);
                }
            }
            b"p" if depth == builder.depth + 2 => {
                if let (Some(paragraph), Some(body)) =
                    (builder.paragraph.take(), builder.shape.text_body.as_mut())
                {
                    body.push(paragraph);
                }
            }
            _ => {}
        }
    }
}
