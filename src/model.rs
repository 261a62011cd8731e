// src/model.rs
//! The document model: elements, styles and the template they make up.
//!
//! A [`Template`] is built fresh per generation request by the synthesizer,
//! positioned by the layout engine and consumed once by the render
//! dispatcher. Element sizes are fixed at synthesis time; positions are
//! assigned exactly once during pagination.

use crate::error::GenerationError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// x,y coordinates in document units, measured from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A4 portrait in millimeters.
    pub fn a4() -> Self {
        Self { width: 210.0, height: 297.0 }
    }
}

/// Position plus size. Serialized flat (`{x, y, width, height}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(flatten)]
    pub position: Position,
    #[serde(flatten)]
    pub size: Size,
}

impl Bounds {
    pub fn sized(width: f32, height: f32) -> Self {
        Self { position: Position::default(), size: Size::new(width, height) }
    }
}

/// Edge widths, used both for page margins and element padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn uniform(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

/// An RGB color, serialized as a `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Parse a hex color string (#RGB or #RRGGBB format).
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        if !s.starts_with('#') {
            return Err(format!("color must start with #, got: {}", s));
        }
        let hex = &s[1..];

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16)
                    .map_err(|e| format!("invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16)
                    .map_err(|e| format!("invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16)
                    .map_err(|e| format!("invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| format!("invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| format!("invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| format!("invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            _ => Err(format!(
                "invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s).map_err(de::Error::custom)
    }
}

/// Horizontal text alignment.
///
/// `Justify` is accepted for forward compatibility but currently renders
/// identically to `Left`; true justification is out of scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub style: BorderStyle,
}

impl Default for Border {
    fn default() -> Self {
        Self { width: 0.2, color: Color::BLACK, style: BorderStyle::Solid }
    }
}

/// Visual properties of an element. Every field is optional; renderers
/// substitute the documented defaults for missing values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

impl Style {
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn font_color(&self) -> Color {
        self.font_color.unwrap_or(Color::BLACK)
    }

    pub fn padding(&self) -> Padding {
        self.padding.unwrap_or_default()
    }

    pub fn alignment_or(&self, default: Alignment) -> Alignment {
        self.alignment.unwrap_or(default)
    }
}

/// The kind of an element, deciding which renderer paints it.
///
/// The set is open: anything beyond the built-in kinds deserializes as
/// [`ElementKind::Other`] and dispatches through whatever renderer the
/// caller registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Table,
    Image,
    #[serde(untagged)]
    Other(String),
}

impl ElementKind {
    pub fn other(name: impl Into<String>) -> Self {
        ElementKind::Other(name.into())
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Text => f.write_str("text"),
            ElementKind::Table => f.write_str("table"),
            ElementKind::Image => f.write_str("image"),
            ElementKind::Other(name) => f.write_str(name),
        }
    }
}

/// One positioned, styled visual unit of the document.
///
/// `content` is kind-specific: a string for text and image elements, a 2-D
/// array of cell values for tables. Renderers validate the shape at render
/// time and fail with `RenderFailed` on a mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub bounds: Bounds,
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Element {
    /// The element's style, or an all-default one when none was set.
    pub fn style(&self) -> Style {
        self.style.clone().unwrap_or_default()
    }
}

/// The full ordered set of elements plus page geometry, before pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    pub version: String,
    pub page_size: Size,
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl Template {
    /// Structural validation: non-empty name, positive page dimensions, at
    /// least one element.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.name.is_empty() {
            return Err(GenerationError::InvalidTemplate(
                "template name is required".to_string(),
            ));
        }
        if self.page_size.width <= 0.0 || self.page_size.height <= 0.0 {
            return Err(GenerationError::InvalidTemplate(format!(
                "invalid page size {}x{}",
                self.page_size.width, self.page_size.height
            )));
        }
        if self.elements.is_empty() {
            return Err(GenerationError::InvalidTemplate(
                "template must contain at least one element".to_string(),
            ));
        }
        Ok(())
    }

    /// Schema hook. Without a configured schema this always succeeds; with
    /// one, only the top-level `type` keyword is checked. Full schema
    /// enforcement is a collaborator concern, not part of this pipeline.
    pub fn validate_data(&self, data: &Value) -> Result<(), GenerationError> {
        let Some(schema) = &self.schema else {
            return Ok(());
        };
        let Some(expected) = schema.get("type").and_then(Value::as_str) else {
            return Ok(());
        };
        let actual = json_type_name(data);
        if expected != actual {
            return Err(GenerationError::InvalidData(format!(
                "expected top-level {}, got {}",
                expected, actual
            )));
        }
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
