// src/upload.rs
//! Upload collaborator: ships a finished document to the storage service.
//!
//! The transport is a blocking multipart POST carrying the file plus a JSON
//! metadata field, authorized with a bearer token. Upload failures are their
//! own error type and are never conflated with generation errors; a
//! rejected request keeps the raw status and response body for diagnosis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("invalid upload configuration: {0}")]
    InvalidConfig(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("could not decode upload response: {message}; body: {body}")]
    InvalidResponse { message: String, body: String },
}

/// Metadata for a single upload. All fields are required and validated
/// before anything is transmitted.
#[derive(Debug, Clone, Default)]
pub struct UploadConfig {
    pub organization_id: String,
    pub branch_id: String,
    pub created_by: String,
    pub file_name: String,
}

impl UploadConfig {
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.organization_id.is_empty() {
            return Err(UploadError::InvalidConfig(
                "organization id is required".to_string(),
            ));
        }
        if self.branch_id.is_empty() {
            return Err(UploadError::InvalidConfig("branch id is required".to_string()));
        }
        if self.created_by.is_empty() {
            return Err(UploadError::InvalidConfig("creator is required".to_string()));
        }
        if self.file_name.is_empty() {
            return Err(UploadError::InvalidConfig("file name is required".to_string()));
        }
        Ok(())
    }
}

/// The storage service's answer to a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_name: String,
    pub file_download_uri: String,
    pub file_type: String,
    pub size: i64,
}

/// Accepts a finished byte stream plus metadata and returns the storage
/// service's record of it.
pub trait Uploader {
    fn upload(&self, data: &[u8], config: &UploadConfig) -> Result<UploadResponse, UploadError>;
}

/// Multipart HTTP uploader.
pub struct HttpUploader {
    base_url: String,
    bearer_token: String,
    client: reqwest::blocking::Client,
}

impl HttpUploader {
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, data: &[u8], config: &UploadConfig) -> Result<UploadResponse, UploadError> {
        config.validate()?;

        log::info!(
            "uploading {} ({} bytes) for org {}",
            config.file_name,
            data.len(),
            config.organization_id
        );

        let metadata = serde_json::json!({
            "organizationalId": config.organization_id,
            "branchId": config.branch_id,
            "createdBy": config.created_by,
        });

        let file_part = reqwest::blocking::multipart::Part::bytes(data.to_vec())
            .file_name(config.file_name.clone())
            .mime_str("application/pdf")?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("file", file_part)
            .text("metadata", metadata.to_string());

        let response = self
            .client
            .post(&self.base_url)
            .query(&[
                ("organisationalId", config.organization_id.as_str()),
                ("branchId", config.branch_id.as_str()),
                ("createdBy", config.created_by.as_str()),
                ("authenticate", "false"),
            ])
            .bearer_auth(&self.bearer_token)
            .multipart(form)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| UploadError::InvalidResponse {
            message: e.to_string(),
            body,
        })
    }
}
