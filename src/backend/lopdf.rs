// src/backend/lopdf.rs
//! In-memory PDF drawing backend built on `lopdf`.
//!
//! Pages are accumulated as raw content streams and assembled into the
//! document object tree on [`DrawingBackend::serialize`]. Fonts are the
//! base-14 Type1 set (WinAnsiEncoding), so no font files are embedded;
//! string measurement uses a width heuristic per glyph.

use super::{BackendError, DrawingBackend, Orientation, RectStyle, Unit};
use crate::model::{BorderStyle, Color, Size};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::BTreeMap;

/// Average glyph advance as a fraction of the font size. Good enough for
/// alignment of short report strings; exact metrics are a collaborator
/// concern.
const GLYPH_WIDTH_FACTOR: f32 = 0.6;

pub struct LopdfBackend {
    doc: Document,
    pages_id: ObjectId,
    page_width_pt: f32,
    page_height_pt: f32,
    /// Points per document unit.
    k: f32,
    current: Option<Content>,
    completed: Vec<Content>,
    /// BaseFont name -> internal resource name (F1, F2, ...).
    fonts: BTreeMap<String, String>,
    /// Image path -> internal resource name (Im1, Im2, ...).
    images: BTreeMap<String, (String, ObjectId)>,
    font_family: String,
    font_size_pt: f32,
    text_color: Color,
}

impl LopdfBackend {
    pub fn new(orientation: Orientation, unit: Unit, page_size: Size) -> Self {
        let k = unit.points_per_unit();
        let (width, height) = match orientation {
            Orientation::Portrait => (page_size.width, page_size.height),
            Orientation::Landscape => (page_size.height, page_size.width),
        };
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_width_pt: width * k,
            page_height_pt: height * k,
            k,
            current: None,
            completed: Vec::new(),
            fonts: BTreeMap::new(),
            images: BTreeMap::new(),
            font_family: crate::model::DEFAULT_FONT_FAMILY.to_string(),
            font_size_pt: crate::model::DEFAULT_FONT_SIZE,
            text_color: Color::BLACK,
        }
    }

    /// Map requested families onto the base-14 set; unknown names pass
    /// through and are left to the viewer's substitution.
    fn base_font(family: &str) -> &str {
        match family {
            "Helvetica" | "Arial" => "Helvetica",
            "Times" | "Times New Roman" => "Times-Roman",
            "Courier" | "Courier New" => "Courier",
            other => other,
        }
    }

    fn intern_font(&mut self, family: &str) -> String {
        let base = Self::base_font(family).to_string();
        let next = format!("F{}", self.fonts.len() + 1);
        self.fonts.entry(base).or_insert(next).clone()
    }

    fn page_ops(&mut self) -> Option<&mut Vec<Operation>> {
        match self.current.as_mut() {
            Some(content) => Some(&mut content.operations),
            None => {
                log::warn!("drawing call ignored: no page open yet");
                None
            }
        }
    }

    fn push_rgb(ops: &mut Vec<Operation>, operator: &str, color: Color) {
        ops.push(Operation::new(
            operator,
            vec![
                (color.r as f32 / 255.0).into(),
                (color.g as f32 / 255.0).into(),
                (color.b as f32 / 255.0).into(),
            ],
        ));
    }
}

impl DrawingBackend for LopdfBackend {
    fn add_page(&mut self) {
        if let Some(done) = self.current.take() {
            self.completed.push(done);
        }
        self.current = Some(Content { operations: vec![] });
    }

    fn set_font(&mut self, family: &str, size_pt: f32) {
        self.font_family = family.to_string();
        self.font_size_pt = size_pt;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn measure_string_width(&self, text: &str) -> f32 {
        let glyphs = text.chars().count() as f32;
        glyphs * self.font_size_pt * GLYPH_WIDTH_FACTOR / self.k
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        let font_name = self.intern_font(&self.font_family.clone());
        let (size, color) = (self.font_size_pt, self.text_color);
        let (k, page_height) = (self.k, self.page_height_pt);
        let Some(ops) = self.page_ops() else { return };

        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font_name.into_bytes()), size.into()],
        ));
        Self::push_rgb(ops, "rg", color);
        ops.push(Operation::new(
            "Td",
            vec![(x * k).into(), (page_height - y * k).into()],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: &RectStyle) {
        let (k, page_height) = (self.k, self.page_height_pt);
        let fill = style.fill;
        let stroke = style.stroke;
        let Some(ops) = self.page_ops() else { return };

        // Top-left origin -> PDF bottom-left origin.
        let rect = vec![
            (x * k).into(),
            (page_height - (y + height) * k).into(),
            (width * k).into(),
            (height * k).into(),
        ];

        if let Some(color) = fill {
            Self::push_rgb(ops, "rg", color);
            ops.push(Operation::new("re", rect.clone()));
            ops.push(Operation::new("f", vec![]));
        }
        if let Some(stroke) = stroke {
            Self::push_rgb(ops, "RG", stroke.color);
            ops.push(Operation::new("w", vec![(stroke.width * k).into()]));
            if stroke.style == BorderStyle::Dotted {
                ops.push(Operation::new(
                    "d",
                    vec![
                        Object::Array(vec![Object::Integer(1), Object::Integer(2)]),
                        0.into(),
                    ],
                ));
            }
            ops.push(Operation::new("re", rect));
            ops.push(Operation::new("S", vec![]));
            if stroke.style == BorderStyle::Dotted {
                ops.push(Operation::new(
                    "d",
                    vec![Object::Array(vec![]), 0.into()],
                ));
            }
        }
    }

    fn draw_image(
        &mut self,
        reference: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), BackendError> {
        let name = match self.images.get(reference) {
            Some((name, _)) => name.clone(),
            None => {
                let stream =
                    lopdf::xobject::image(reference).map_err(|e| BackendError::Resource {
                        reference: reference.to_string(),
                        message: e.to_string(),
                    })?;
                let id = self.doc.add_object(stream);
                let name = format!("Im{}", self.images.len() + 1);
                self.images
                    .insert(reference.to_string(), (name.clone(), id));
                name
            }
        };

        let (k, page_height) = (self.k, self.page_height_pt);
        let Some(ops) = self.page_ops() else { return Ok(()) };

        // The unit image square is scaled to the element bounds by the
        // current transformation matrix.
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                (width * k).into(),
                0.into(),
                0.into(),
                (height * k).into(),
                (x * k).into(),
                (page_height - (y + height) * k).into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn serialize(mut self: Box<Self>) -> Result<Vec<u8>, BackendError> {
        if let Some(done) = self.current.take() {
            self.completed.push(done);
        }

        let mut font_dict = Dictionary::new();
        for (base_font, internal_name) in &self.fonts {
            let single = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font.as_str(),
                "Encoding" => "WinAnsiEncoding",
            };
            font_dict.set(internal_name.as_bytes(), Object::Dictionary(single));
        }
        let mut xobject_dict = Dictionary::new();
        for (name, id) in self.images.values() {
            xobject_dict.set(name.as_bytes(), Object::Reference(*id));
        }
        let mut resources = dictionary! { "Font" => font_dict };
        if !xobject_dict.is_empty() {
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }
        let resources_id = self.doc.add_object(resources);

        let mut page_ids = Vec::with_capacity(self.completed.len());
        for content in self.completed.drain(..) {
            let encoded = content.encode()?;
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![
                    0.into(), 0.into(),
                    self.page_width_pt.into(), self.page_height_pt.into(),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}
