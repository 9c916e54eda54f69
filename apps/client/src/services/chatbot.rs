//! Career-advice chatbot: questions in, cleaned answers and resources out.
//!
//! Chatbot requests are the one surface where a 401 does not tear down the
//! session; the client handles that carve-out, this service just surfaces
//! [`ApiError::Unauthorized`] so the UI can show [`LOGIN_PROMPT`].

use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::non_empty;

/// What UIs show when the chatbot declines an anonymous visitor.
pub const LOGIN_PROMPT: &str = "Please login to continue using the chatbot";

#[derive(Debug, Serialize)]
struct AskRequest {
    question: String,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    // Different backend revisions named the answer field differently.
    #[serde(default, alias = "message", alias = "response")]
    answer: Option<String>,
    #[serde(default)]
    resources: Vec<CareerResource>,
}

/// A link the bot attaches to an answer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CareerResource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// An answer with chat-hostile markup removed.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub answer: String,
    pub resources: Vec<CareerResource>,
}

#[derive(Clone)]
pub struct ChatbotService {
    client: ApiClient,
}

impl ChatbotService {
    pub fn new(client: ApiClient) -> Self {
        ChatbotService { client }
    }

    /// Asks the bot a question. Blank questions are dropped locally; an
    /// answerless response is reported as a backend failure.
    pub async fn ask(&self, question: &str) -> Result<BotReply, ApiError> {
        let question = non_empty(question, "Please enter a question")?;
        let request = AskRequest { question };
        let response: AskResponse = self.client.post("/chatbot/ask", &request).await?;

        let Some(answer) = response.answer else {
            return Err(ApiError::Backend {
                status: 200,
                message: "No response from the bot".to_string(),
            });
        };
        Ok(BotReply {
            answer: strip_markdown(&answer),
            resources: response.resources,
        })
    }

    /// Curated career resources shown alongside the chat.
    pub async fn career_resources(&self) -> Result<Vec<CareerResource>, ApiError> {
        self.client.get("/chatbot/resources").await
    }
}

/// The model answers in markdown; chat bubbles want plain text. Bold and
/// heading markers and code fences go, links and line breaks stay.
fn strip_markdown(text: &str) -> String {
    text.replace("```", "").replace(['*', '#'], "")
}
