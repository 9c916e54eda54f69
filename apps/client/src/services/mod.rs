//! Feature services: thin typed wrappers over [`ApiClient`](crate::api_client::ApiClient).
//!
//! Each service shapes a request, hands it to the shared client, and maps the
//! response into domain types. Validation that needs no server round-trip
//! (empty text, wrong file type, oversized file) happens here, before any
//! request goes out.

use std::path::Path;

use reqwest::multipart::Part;
use serde::Deserialize;

use crate::errors::ApiError;

pub mod auth;
pub mod chatbot;
pub mod courses;
pub mod cover_letter;
pub mod feedback;
pub mod jobs;
pub mod resume;
pub mod user;

/// Upload cap enforced before any bytes leave the machine.
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

const PDF_MIME: &str = "application/pdf";
const DOC_MIME: &str = "application/msword";
const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

fn mime_for(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(PDF_MIME),
        "doc" => Some(DOC_MIME),
        "docx" => Some(DOCX_MIME),
        _ => None,
    }
}

/// A resume file validated for upload. Construction enforces the accepted
/// formats and the size cap, in that order, so every `Attachment` that
/// exists is safe to send.
#[derive(Debug, Clone)]
pub struct Attachment {
    filename: String,
    bytes: Vec<u8>,
    mime: &'static str,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ApiError> {
        let filename = filename.into();
        let mime = mime_for(&filename).ok_or_else(|| {
            ApiError::Validation("Please upload a PDF or DOC/DOCX file".to_string())
        })?;
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(ApiError::Validation(
                "File size must be less than 5MB".to_string(),
            ));
        }
        Ok(Attachment {
            filename,
            bytes,
            mime,
        })
    }

    /// Reads and validates a file from disk.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::Setup(format!("failed to read {}: {err}", path.display())))?;
        Attachment::new(filename, bytes)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub(crate) fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.filename)
            .mime_str(self.mime)
            .map_err(|err| ApiError::Setup(err.to_string()))
    }
}

/// Trimmed `value`, or the given validation message if nothing is left.
pub(crate) fn non_empty(value: &str, message: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Trimmed `value`, requiring at least `min` characters.
pub(crate) fn min_chars(value: &str, min: usize, message: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Scores arrive as floats, sometimes out of range. Display wants 0-100.
pub(crate) fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// Response for endpoints that confirm an action without returning data.
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}
