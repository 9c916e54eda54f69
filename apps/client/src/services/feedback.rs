//! Sentiment analysis over free-form feedback text.

use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::{clamp_score, non_empty};

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    feedback: String,
}

#[derive(Debug, Deserialize)]
struct FeedbackResponse {
    #[serde(default)]
    sentiment: String,
    #[serde(default = "default_sentiment_score")]
    sentiment_score: f64,
    #[serde(default)]
    key_insights: Vec<String>,
    #[serde(default)]
    improvement_areas: Vec<String>,
    #[serde(default)]
    recommendations: String,
}

/// Midpoint stands in when the backend does not commit to a score.
fn default_sentiment_score() -> f64 {
    50.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackAnalysis {
    pub sentiment: String,
    pub sentiment_score: u8,
    pub key_insights: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub recommendations: String,
}

impl From<FeedbackResponse> for FeedbackAnalysis {
    fn from(raw: FeedbackResponse) -> Self {
        FeedbackAnalysis {
            sentiment: if raw.sentiment.is_empty() {
                "Neutral".to_string()
            } else {
                raw.sentiment
            },
            sentiment_score: clamp_score(raw.sentiment_score),
            key_insights: raw.key_insights,
            improvement_areas: raw.improvement_areas,
            recommendations: raw.recommendations,
        }
    }
}

#[derive(Clone)]
pub struct FeedbackService {
    client: ApiClient,
}

impl FeedbackService {
    pub fn new(client: ApiClient) -> Self {
        FeedbackService { client }
    }

    /// Sends feedback text for sentiment analysis.
    pub async fn analyze(&self, feedback: &str) -> Result<FeedbackAnalysis, ApiError> {
        let feedback = non_empty(feedback, "Please enter feedback text")?;
        let request = AnalyzeRequest { feedback };
        let raw: FeedbackResponse = self.client.post("/feedback/analyze", &request).await?;
        Ok(raw.into())
    }
}
