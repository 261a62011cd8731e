#![allow(dead_code)]

use lopdf::Document as LopdfDocument;
use reportgen::{
    BackendError, Color, DrawingBackend, GenerationError, Generator, RectStyle, Template,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Shared handle onto a recording backend's call log. The backend itself is
/// consumed by serialization, so tests keep this handle to inspect the
/// sequence afterwards.
pub type CallLog = Arc<Mutex<Vec<BackendCall>>>;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    AddPage,
    SetFont { family: String, size: f32 },
    SetTextColor(Color),
    DrawText { x: f32, y: f32, text: String },
    DrawRect { x: f32, y: f32, width: f32, height: f32, filled: bool, stroked: bool },
    DrawImage { reference: String, x: f32, y: f32, width: f32, height: f32 },
    Serialize,
}

/// A mock drawing backend that records every call instead of drawing.
///
/// String measurement is a fixed width per character so alignment math is
/// exactly predictable in tests.
pub struct RecordingBackend {
    calls: CallLog,
    char_width: f32,
    fail_images: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            char_width: 2.0,
            fail_images: false,
        }
    }

    /// Fix the measured width of one character, in document units.
    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    /// Make every `draw_image` fail with a resource error.
    pub fn with_failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }

    pub fn log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DrawingBackend for RecordingBackend {
    fn add_page(&mut self) {
        self.record(BackendCall::AddPage);
    }

    fn set_font(&mut self, family: &str, size_pt: f32) {
        self.record(BackendCall::SetFont { family: family.to_string(), size: size_pt });
    }

    fn set_text_color(&mut self, color: Color) {
        self.record(BackendCall::SetTextColor(color));
    }

    fn measure_string_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.record(BackendCall::DrawText { x, y, text: text.to_string() });
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: &RectStyle) {
        self.record(BackendCall::DrawRect {
            x,
            y,
            width,
            height,
            filled: style.fill.is_some(),
            stroked: style.stroke.is_some(),
        });
    }

    fn draw_image(
        &mut self,
        reference: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), BackendError> {
        if self.fail_images {
            return Err(BackendError::Resource {
                reference: reference.to_string(),
                message: "no such file".to_string(),
            });
        }
        self.record(BackendCall::DrawImage {
            reference: reference.to_string(),
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn serialize(self: Box<Self>) -> Result<Vec<u8>, BackendError> {
        self.record(BackendCall::Serialize);
        Ok(b"%recorded".to_vec())
    }
}

/// Render a template through a recording backend, returning the result and
/// the call log.
pub fn render_recorded(
    generator: &Generator,
    template: &Template,
    data: &Value,
) -> (Result<Vec<u8>, GenerationError>, CallLog) {
    let backend = RecordingBackend::new();
    let log = backend.log();
    let result =
        generator.render_template_with_backend(template, data, Box::new(backend), None);
    (result, log)
}

/// Generate through the full pipeline with a recording backend.
pub fn generate_recorded(
    generator: &Generator,
    data: &Value,
) -> (Result<Vec<u8>, GenerationError>, CallLog) {
    let template = generator.synthesize(data);
    render_recorded(generator, &template, data)
}

/// Wrapper around a generated PDF with helper methods.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extract the text content of every page.
    pub fn extract_text(&self) -> String {
        let mut text = String::new();
        for page_num in 1..=self.page_count() {
            match self.doc.extract_text(&[page_num as u32]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => {
                    eprintln!("warning: could not extract text from page {}: {}", page_num, e);
                }
            }
        }
        text
    }
}

/// Generate a PDF from data and parse it back.
pub fn generate_pdf(data: &Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let generator = Generator::new();
    let bytes = generator.generate(data)?;
    GeneratedPdf::from_bytes(bytes)
}
