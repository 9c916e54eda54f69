//! Cover-letter generation from resume text and a job description.

use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::min_chars;

/// Below this the model has nothing to work with, so the call is refused
/// locally.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    resume_text: String,
    job_description: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    cover_letter: Option<String>,
}

#[derive(Clone)]
pub struct CoverLetterService {
    client: ApiClient,
}

impl CoverLetterService {
    pub fn new(client: ApiClient) -> Self {
        CoverLetterService { client }
    }

    /// Generates a cover letter tailored to the job description. Both inputs
    /// are trimmed and must carry at least [`MIN_TEXT_CHARS`] characters.
    pub async fn generate(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String, ApiError> {
        let request = GenerateRequest {
            resume_text: min_chars(
                resume_text,
                MIN_TEXT_CHARS,
                "Resume text is too short or empty",
            )?,
            job_description: min_chars(
                job_description,
                MIN_TEXT_CHARS,
                "Job description is too short or empty",
            )?,
        };

        let response: GenerateResponse =
            self.client.post("/cover-letter/generate", &request).await?;
        response.cover_letter.ok_or(ApiError::Backend {
            status: 200,
            message: "Cover letter generation failed".to_string(),
        })
    }
}
