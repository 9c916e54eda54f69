//! Job matching against an uploaded resume, plus plain job search.

use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::{clamp_score, Attachment};

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    matching_score: f64,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    #[serde(default)]
    jobs: Vec<JobRow>,
}

/// A job with its resume-fit score normalized to 0-100.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub matching_score: u8,
    pub url: Option<String>,
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        JobPosting {
            title: row.title,
            company: row.company,
            location: row.location,
            matching_score: clamp_score(row.matching_score),
            url: row.url,
        }
    }
}

/// Search terms; absent fields are left out of the request entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Clone)]
pub struct JobService {
    client: ApiClient,
}

impl JobService {
    pub fn new(client: ApiClient) -> Self {
        JobService { client }
    }

    /// Uploads a resume and returns jobs ranked by how well they fit it.
    pub async fn match_jobs(
        &self,
        resume: Attachment,
        query: &str,
        location: &str,
    ) -> Result<Vec<JobPosting>, ApiError> {
        let form = Form::new()
            .part("resume", resume.into_part()?)
            .text("query", query.to_string())
            .text("location", location.to_string());
        let response: MatchResponse = self.client.post_multipart("/job/match", form).await?;
        Ok(response.jobs.into_iter().map(JobPosting::from).collect())
    }

    /// Plain search over the job board, no resume involved.
    pub async fn search(&self, filters: &JobFilters) -> Result<Vec<JobPosting>, ApiError> {
        let rows: Vec<JobRow> = self.client.post("/jobs/search", filters).await?;
        Ok(rows.into_iter().map(JobPosting::from).collect())
    }
}
