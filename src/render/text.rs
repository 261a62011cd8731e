// src/render/text.rs
use super::{ElementRenderer, RenderContext};
use crate::backend::RectStyle;
use crate::error::GenerationError;
use crate::model::{Alignment, Element};
use serde_json::Value;

/// Line advance as a multiple of the font size, consistent across the whole
/// text path.
const LINE_SPACING: f32 = 1.2;

/// Paints multi-line text with per-line horizontal alignment.
///
/// When the style carries a background color the bounds are filled first,
/// which is what makes section headers stand out. `Alignment::Justify` is a
/// documented limitation and renders as `Left`.
pub struct TextRenderer;

impl ElementRenderer for TextRenderer {
    fn render(&self, ctx: &mut RenderContext<'_>, element: &Element) -> Result<(), GenerationError> {
        let Value::String(content) = &element.content else {
            return Err(GenerationError::render(
                &element.id,
                format!("text content must be a string, got {}", type_of(&element.content)),
            ));
        };

        let style = element.style();
        let bounds = element.bounds;
        let padding = style.padding();

        if let Some(background) = style.background {
            ctx.backend.draw_rect(
                bounds.position.x,
                bounds.position.y,
                bounds.size.width,
                bounds.size.height,
                &RectStyle::filled(background),
            );
        }

        ctx.backend.set_font(style.font_family(), style.font_size());
        ctx.backend.set_text_color(style.font_color());

        let line_height = ctx.point_to_unit(style.font_size()) * LINE_SPACING;
        let inner_x = bounds.position.x + padding.left;
        let inner_width = bounds.size.width - padding.left - padding.right;
        let alignment = style.alignment_or(Alignment::Left);

        for (i, line) in content.split('\n').enumerate() {
            let measured = ctx.backend.measure_string_width(line);
            let x = aligned_x(alignment, inner_x, inner_width, measured);
            let y = bounds.position.y + padding.top + line_height * (i + 1) as f32;
            ctx.backend.draw_text(x, y, line);
        }

        Ok(())
    }
}

/// Horizontal offset of a text run inside its box.
pub(crate) fn aligned_x(alignment: Alignment, x: f32, width: f32, measured: f32) -> f32 {
    match alignment {
        // Justification is not implemented; it falls back to left.
        Alignment::Left | Alignment::Justify => x,
        Alignment::Center => x + (width - measured) / 2.0,
        Alignment::Right => x + width - measured,
    }
}

pub(crate) fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
