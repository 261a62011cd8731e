// src/generator.rs
//! Assembles the pipeline: synthesis, validation, pagination, rendering.

use crate::backend::{DrawingBackend, LopdfBackend};
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::layout::Paginator;
use crate::model::{ElementKind, Template};
use crate::render::{ElementRenderer, RendererRegistry};
use crate::synthesis::TemplateSynthesizer;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag for one generation run.
///
/// The pipeline checks it once before each page's render loop; a cancelled
/// run aborts with [`GenerationError::Cancelled`] and produces no bytes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// One document-generation pipeline: data in, PDF bytes out.
///
/// Each generator owns its renderer registry, so independent instances can
/// run on separate threads without sharing state. One call to
/// [`Generator::generate`] uses one freshly constructed drawing backend;
/// backends are never reused across documents.
pub struct Generator {
    config: GeneratorConfig,
    registry: RendererRegistry,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            registry: RendererRegistry::with_builtins(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Register or override the renderer for an element kind.
    pub fn register_renderer(&mut self, kind: ElementKind, renderer: Box<dyn ElementRenderer>) {
        self.registry.register(kind, renderer);
    }

    /// Build a template from the data without rendering it.
    pub fn synthesize(&self, data: &Value) -> Template {
        TemplateSynthesizer::new(self.config.clone()).synthesize(data)
    }

    /// Generate a PDF from the data: synthesize, paginate, render.
    pub fn generate(&self, data: &Value) -> Result<Vec<u8>, GenerationError> {
        let template = self.synthesize(data);
        self.render_template(&template, data, None)
    }

    /// Like [`Generator::generate`], checking the token between pages.
    pub fn generate_with_cancel(
        &self,
        data: &Value,
        cancel: &CancelToken,
    ) -> Result<Vec<u8>, GenerationError> {
        let template = self.synthesize(data);
        self.render_template(&template, data, Some(cancel))
    }

    /// Generate and write the document to a file.
    pub fn generate_to_file<P: AsRef<Path>>(
        &self,
        data: &Value,
        path: P,
    ) -> Result<(), GenerationError> {
        let bytes = self.generate(data)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Validate and render an already-built template against a fresh
    /// production backend.
    pub fn render_template(
        &self,
        template: &Template,
        data: &Value,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<u8>, GenerationError> {
        let backend = Box::new(LopdfBackend::new(
            self.config.orientation,
            self.config.unit,
            template.page_size,
        ));
        self.render_template_with_backend(template, data, backend, cancel)
    }

    /// Render against a caller-supplied backend. The backend must be
    /// freshly constructed; it is consumed by serialization.
    pub fn render_template_with_backend(
        &self,
        template: &Template,
        data: &Value,
        backend: Box<dyn DrawingBackend>,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<u8>, GenerationError> {
        template.validate()?;
        template.validate_data(data)?;

        let paginator = Paginator::new(template.page_size, self.config.margins);
        let placement = paginator.paginate(template.elements.clone())?;

        self.registry
            .render_all(backend, &placement, &self.config, cancel)
    }
}
