// src/render/image.rs
use super::text::type_of;
use super::{ElementRenderer, RenderContext};
use crate::error::GenerationError;
use crate::model::Element;
use serde_json::Value;

/// Paints an image resource scaled to the element bounds.
///
/// Content must be a resource reference (a file path). Resource-resolution
/// failures come back from the backend unmodified.
pub struct ImageRenderer;

impl ElementRenderer for ImageRenderer {
    fn render(&self, ctx: &mut RenderContext<'_>, element: &Element) -> Result<(), GenerationError> {
        let Value::String(reference) = &element.content else {
            return Err(GenerationError::render(
                &element.id,
                format!(
                    "image content must be a resource reference string, got {}",
                    type_of(&element.content)
                ),
            ));
        };

        let bounds = element.bounds;
        ctx.backend.draw_image(
            reference,
            bounds.position.x,
            bounds.position.y,
            bounds.size.width,
            bounds.size.height,
        )?;
        Ok(())
    }
}
