//! Resume analysis against a target job description.

use std::collections::HashMap;

use reqwest::multipart::Form;
use serde::Deserialize;

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::{clamp_score, Attachment};

/// Wire shape of an analysis. Everything defaults because the backend omits
/// whatever it could not compute for a given resume.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    ats_score: f64,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    missing_keywords: Vec<String>,
    #[serde(default)]
    score_breakdown: HashMap<String, f64>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Analysis result with every score normalized to 0-100 and suggestion
/// markup stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct AtsReport {
    pub ats_score: u8,
    pub keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub score_breakdown: HashMap<String, u8>,
    pub suggestions: Vec<String>,
}

impl From<AnalyzeResponse> for AtsReport {
    fn from(raw: AnalyzeResponse) -> Self {
        AtsReport {
            ats_score: clamp_score(raw.ats_score),
            keywords: raw.keywords,
            missing_keywords: raw.missing_keywords,
            score_breakdown: raw
                .score_breakdown
                .into_iter()
                .map(|(category, score)| (category, clamp_score(score)))
                .collect(),
            // The model bolds keywords with ** markers; plain text reads better.
            suggestions: raw
                .suggestions
                .into_iter()
                .map(|s| s.replace("**", ""))
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct ResumeService {
    client: ApiClient,
}

impl ResumeService {
    pub fn new(client: ApiClient) -> Self {
        ResumeService { client }
    }

    /// Uploads the resume alongside the job description and returns the
    /// backend's ATS analysis.
    pub async fn analyze(
        &self,
        resume: Attachment,
        job_description: &str,
    ) -> Result<AtsReport, ApiError> {
        let form = Form::new()
            .part("resume", resume.into_part()?)
            .text("job_description", job_description.to_string());
        let raw: AnalyzeResponse = self.client.post_multipart("/resume/analyze", form).await?;
        Ok(raw.into())
    }
}
