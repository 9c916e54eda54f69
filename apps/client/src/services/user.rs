//! Account profile and the user's stored resumes.
//!
//! This corner of the backend speaks camelCase, unlike the analysis
//! endpoints; the serde renames below are deliberate, not drift.

use serde::{Deserialize, Deserializer, Serialize};

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::Acknowledgement;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A resume the user uploaded earlier, as listed on the profile page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    #[serde(deserialize_with = "de_id")]
    pub resume_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    /// Upload time as the backend formats it; display-only.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Resume ids have shipped as both strings and numbers.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub user: AccountInfo,
    #[serde(default)]
    pub resumes: Vec<StoredResume>,
}

/// Partial profile edit; only the fields being changed go on the wire.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        UserService { client }
    }

    /// Account details plus the stored-resume list.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/user/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Acknowledgement, ApiError> {
        self.client.put("/user/profile", update).await
    }

    /// Deletes a stored resume. The endpoint acknowledges with an explicit
    /// `success` flag; anything else counts as a refusal.
    pub async fn delete_resume(&self, resume_id: &str) -> Result<Acknowledgement, ApiError> {
        let path = format!("/user/resume/{resume_id}");
        let response: DeleteResponse = self.client.delete(&path).await?;
        if !response.success {
            return Err(ApiError::Backend {
                status: 200,
                message: response
                    .message
                    .unwrap_or_else(|| "Failed to delete resume".to_string()),
            });
        }
        Ok(Acknowledgement {
            message: response.message,
        })
    }
}
