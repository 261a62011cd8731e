// src/render/mod.rs
//! Render dispatch: maps element kinds to renderer capabilities and drives
//! the drawing backend page by page.

use crate::backend::{DrawingBackend, Unit};
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::generator::CancelToken;
use crate::layout::Placement;
use crate::model::{Element, ElementKind, Padding, Size};
use std::collections::HashMap;

mod image;
mod table;
mod text;

pub use self::image::ImageRenderer;
pub use self::table::TableRenderer;
pub use self::text::TextRenderer;

/// What a renderer sees while painting one element: the active drawing
/// surface plus the page geometry it is being placed into.
pub struct RenderContext<'a> {
    pub backend: &'a mut dyn DrawingBackend,
    pub page_size: Size,
    pub margins: Padding,
    pub unit: Unit,
}

impl RenderContext<'_> {
    /// Convert a length in points (font sizes) into document units.
    pub fn point_to_unit(&self, pt: f32) -> f32 {
        pt / self.unit.points_per_unit()
    }
}

/// The behavior that paints one element kind onto the drawing backend.
pub trait ElementRenderer {
    fn render(&self, ctx: &mut RenderContext<'_>, element: &Element) -> Result<(), GenerationError>;
}

/// Open mapping from element kind to renderer capability.
///
/// Owned by one generator instance — never process-global — so concurrent
/// pipelines cannot share or corrupt registry state. Callers may register
/// additional kinds or override the built-ins.
pub struct RendererRegistry {
    renderers: HashMap<ElementKind, Box<dyn ElementRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl RendererRegistry {
    /// An empty registry with no renderers at all.
    pub fn empty() -> Self {
        Self { renderers: HashMap::new() }
    }

    /// A registry with the built-in text, table and image renderers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(ElementKind::Text, Box::new(TextRenderer));
        registry.register(ElementKind::Table, Box::new(TableRenderer));
        registry.register(ElementKind::Image, Box::new(ImageRenderer));
        registry
    }

    /// Register or override the renderer for a kind.
    pub fn register(&mut self, kind: ElementKind, renderer: Box<dyn ElementRenderer>) {
        self.renderers.insert(kind, renderer);
    }

    pub fn get(&self, kind: &ElementKind) -> Option<&dyn ElementRenderer> {
        self.renderers.get(kind).map(Box::as_ref)
    }

    /// Render every page of the placement in order and serialize the
    /// document.
    ///
    /// Exactly one `add_page` is issued per page before its first element
    /// and exactly one `serialize` after the last element of the last page.
    /// Any failure aborts the run before serialization, so no partial
    /// document ever escapes. The optional cancel token is checked once
    /// before each page's element loop.
    pub fn render_all(
        &self,
        mut backend: Box<dyn DrawingBackend>,
        placement: &Placement,
        config: &GeneratorConfig,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<u8>, GenerationError> {
        for page in &placement.pages {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(GenerationError::Cancelled);
            }
            log::debug!(
                "rendering page {} ({} elements)",
                page.number,
                page.elements.len()
            );
            backend.add_page();

            for element in &page.elements {
                let renderer = self.get(&element.kind).ok_or_else(|| {
                    GenerationError::UnsupportedElementType {
                        element: element.id.clone(),
                        kind: element.kind.to_string(),
                    }
                })?;
                let mut ctx = RenderContext {
                    backend: backend.as_mut(),
                    page_size: config.page_size,
                    margins: config.margins,
                    unit: config.unit,
                };
                renderer.render(&mut ctx, element)?;
            }
        }

        Ok(backend.serialize()?)
    }
}
