//! Dynamic data-to-PDF report generation.
//!
//! `reportgen` turns arbitrary nested JSON data into a paginated PDF in
//! three strictly sequential stages:
//!
//! 1. **Synthesis** — [`synthesis::TemplateSynthesizer`] walks the data and
//!    emits an ordered [`model::Template`] of typed elements with intrinsic
//!    heights.
//! 2. **Layout** — [`layout::Paginator`] flows the elements down
//!    single-column pages, assigning each an absolute position and a
//!    1-based page number.
//! 3. **Rendering** — [`render::RendererRegistry`] dispatches every element
//!    to the renderer registered for its kind, which paints it through a
//!    [`backend::DrawingBackend`].
//!
//! The registry is open: custom kinds can be registered per
//! [`generator::Generator`] instance without touching the dispatcher.
//! Failures are fail-fast and non-partial — no bytes escape a failed run.
//!
//! ```no_run
//! use reportgen::Generator;
//! use serde_json::json;
//!
//! let generator = Generator::new();
//! let pdf = generator.generate(&json!({
//!     "customer": { "name": "John Doe" },
//!     "total": 109.97,
//! }))?;
//! std::fs::write("report.pdf", pdf)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod model;
pub mod render;
pub mod service;
pub mod synthesis;
pub mod upload;

pub use backend::{BackendError, DrawingBackend, LopdfBackend, Orientation, RectStyle, Stroke, Unit};
pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use generator::{CancelToken, Generator};
pub use layout::{PlacedPage, Placement, Paginator};
pub use model::{
    Alignment, Border, BorderStyle, Bounds, Color, Element, ElementKind, Padding, Position, Size,
    Style, Template,
};
pub use render::{ElementRenderer, RenderContext, RendererRegistry};
pub use service::{PdfService, ServiceConfig, ServiceError};
pub use upload::{HttpUploader, UploadConfig, UploadError, UploadResponse, Uploader};
