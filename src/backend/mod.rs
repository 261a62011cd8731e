// src/backend/mod.rs
//! The drawing backend seam.
//!
//! [`DrawingBackend`] abstracts the page/primitive drawing surface so the
//! render dispatcher can be exercised against a mock and the PDF writer can
//! be swapped out. The production implementation is [`LopdfBackend`].
//!
//! Callers must open a page with [`DrawingBackend::add_page`] before issuing
//! any drawing call, and finish with exactly one
//! [`DrawingBackend::serialize`].

use crate::model::{BorderStyle, Color};
use thiserror::Error;

mod lopdf;

pub use self::lopdf::LopdfBackend;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to resolve resource '{reference}': {message}")]
    Resource { reference: String, message: String },
    #[error("PDF serialization error: {0}")]
    Pdf(String),
}

impl From<::lopdf::Error> for BackendError {
    fn from(err: ::lopdf::Error) -> Self {
        BackendError::Pdf(err.to_string())
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Pdf(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Document length unit. Font sizes are always points; everything else is
/// expressed in this unit and scaled to points when written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Mm,
    Pt,
}

impl Unit {
    /// PDF points per one document unit.
    pub fn points_per_unit(self) -> f32 {
        match self {
            Unit::Mm => 72.0 / 25.4,
            Unit::Pt => 1.0,
        }
    }
}

/// Stroke settings for rectangle drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
    pub style: BorderStyle,
}

/// How a rectangle is painted: filled, stroked, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectStyle {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), stroke: None }
    }

    pub fn stroked(stroke: Stroke) -> Self {
        Self { fill: None, stroke: Some(stroke) }
    }
}

/// A mutable drawing surface plus document serialization.
///
/// Coordinates are in document units with the origin at the top-left corner
/// of the page; `draw_text` places the baseline at `y`. The backend is not
/// safe for concurrent writers — one generation request owns one backend.
pub trait DrawingBackend {
    /// Open a new page. Subsequent drawing calls target it.
    fn add_page(&mut self);

    /// Select the active font face and size (points) for text drawing and
    /// string measurement.
    fn set_font(&mut self, family: &str, size_pt: f32);

    fn set_text_color(&mut self, color: Color);

    /// Width of `text` in document units when drawn with the active font.
    fn measure_string_width(&self, text: &str) -> f32;

    fn draw_text(&mut self, x: f32, y: f32, text: &str);

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: &RectStyle);

    /// Draw the image behind `reference` (a file path) scaled to the given
    /// bounds. Resource-resolution failures are returned unmodified.
    fn draw_image(
        &mut self,
        reference: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), BackendError>;

    /// Finish the document and return the serialized byte stream. Consumes
    /// the backend: a surface cannot be reused across documents.
    fn serialize(self: Box<Self>) -> Result<Vec<u8>, BackendError>;
}
