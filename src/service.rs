// src/service.rs
//! Service facade: generate a document, optionally push it to storage.

use crate::error::GenerationError;
use crate::generator::Generator;
use crate::upload::{HttpUploader, UploadConfig, UploadError, UploadResponse, Uploader};
use serde_json::Value;
use thiserror::Error;

/// Service-level errors keep the generation and upload arms distinct so a
/// transport failure is never mistaken for a bad document.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),
}

/// Connection settings for the storage service.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub upload_base_url: String,
    pub bearer_token: String,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.upload_base_url.is_empty() {
            return Err(ServiceError::Config("upload base URL is required".to_string()));
        }
        if self.bearer_token.is_empty() {
            return Err(ServiceError::Config("bearer token is required".to_string()));
        }
        Ok(())
    }
}

/// Generates PDF reports from data and uploads them.
pub struct PdfService {
    generator: Generator,
    uploader: Box<dyn Uploader>,
}

impl PdfService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self {
            generator: Generator::new(),
            uploader: Box::new(HttpUploader::new(config.upload_base_url, config.bearer_token)),
        })
    }

    /// Assemble a service from parts, e.g. a tuned generator or a test
    /// uploader.
    pub fn with_parts(generator: Generator, uploader: Box<dyn Uploader>) -> Self {
        Self { generator, uploader }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Generate a PDF without uploading it.
    pub fn generate_only(&self, data: &Value) -> Result<Vec<u8>, GenerationError> {
        self.generator.generate(data)
    }

    /// Generate a PDF and push it to storage.
    pub fn generate_and_upload(
        &self,
        data: &Value,
        upload: &UploadConfig,
    ) -> Result<UploadResponse, ServiceError> {
        let bytes = self.generate_only(data)?;
        let response = self.uploader.upload(&bytes, upload)?;
        log::info!(
            "uploaded {} ({} bytes) -> {}",
            response.file_name,
            response.size,
            response.file_download_uri
        );
        Ok(response)
    }
}
