//! Course recommendations from resume text.

use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::non_empty;

#[derive(Debug, Serialize)]
struct RecommendRequest {
    resume_text: String,
}

/// A course the backend thinks fills a skill gap.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Course {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skill_category: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct CourseService {
    client: ApiClient,
}

impl CourseService {
    pub fn new(client: ApiClient) -> Self {
        CourseService { client }
    }

    /// Recommends courses for the skills missing from the given resume text.
    /// Callers extract the text themselves (textarea or file read).
    pub async fn recommend(&self, resume_text: &str) -> Result<Vec<Course>, ApiError> {
        let resume_text = non_empty(resume_text, "Please upload a resume or enter resume text")?;
        let request = RecommendRequest { resume_text };
        self.client.post("/course/recommend", &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_backend, test_client};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_recommend_returns_courses() {
        async fn handler(Json(body): Json<Value>) -> Json<Value> {
            assert_eq!(body, json!({"resume_text": "Experienced Rust developer"}));
            Json(json!({"success": true, "data": [{
                "title": "Advanced SQL",
                "platform": "Coursera",
                "description": "Window functions and query planning",
                "skill_category": "Databases",
                "duration": "6 weeks",
                "url": "https://courses.example/sql",
            }]}))
        }

        let base = spawn_backend(Router::new().route("/course/recommend", post(handler))).await;
        let (client, _, _) = test_client(base);
        let service = CourseService::new(client);

        let courses = service
            .recommend("  Experienced Rust developer  ")
            .await
            .unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].title, "Advanced SQL");
        assert_eq!(courses[0].skill_category, "Databases");
    }

    #[tokio::test]
    async fn test_recommend_rejects_empty_text_locally() {
        let (client, _, _) = test_client("http://127.0.0.1:9".to_string());
        let service = CourseService::new(client);

        let err = service.recommend("   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please upload a resume or enter resume text");
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_recommend_tolerates_sparse_course() {
        let app = Router::new().route(
            "/course/recommend",
            post(|| async { Json(json!({"data": [{"title": "Intro to Go"}]})) }),
        );
        let base = spawn_backend(app).await;
        let (client, _, _) = test_client(base);
        let service = CourseService::new(client);

        let courses = service.recommend("text").await.unwrap();
        assert_eq!(courses[0].title, "Intro to Go");
        assert_eq!(courses[0].platform, "");
        assert_eq!(courses[0].url, None);
    }
}
