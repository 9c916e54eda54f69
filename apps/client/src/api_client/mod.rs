//! API client, the single door between this crate and the ResumePro backend.
//!
//! ARCHITECTURAL RULE: no service module may talk to the backend directly.
//! Every request MUST go through [`ApiClient`], which owns bearer token
//! injection, response normalization, and expired-session handling. Services
//! stay thin: they shape requests and deserialize domain types, nothing else.

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ApiError;
use crate::session::TokenStore;

/// Where an expired session lands. The query flag lets the login screen
/// explain why the user got bounced.
pub const LOGIN_REDIRECT: &str = "/login?session_expired=true";

/// Requests under this prefix never trigger the expired-session redirect;
/// the chatbot greets anonymous visitors and prompts for login inline.
const CHATBOT_PREFIX: &str = "/chatbot";

/// Host-side navigation, injected so the client can bounce an expired
/// session to the login screen without knowing what "navigate" means in the
/// embedding application.
pub trait Navigator: Send + Sync {
    fn redirect(&self, location: &str);
}

/// Navigator for embedders with no navigation concept (CLIs, tests, jobs).
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect(&self, _location: &str) {}
}

/// The single HTTP client used by all services. Wraps the backend API with
/// bearer auth, the shared response envelope, and session-expiry handling.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(config: &Config, store: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            http: Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            navigator,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request skeleton for `path`, with the bearer token attached when a
    /// session exists. Anonymous requests go out without the header.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.store.get() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path);
        self.dispatch(path, request).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).json(body);
        self.dispatch(path, request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path).multipart(form);
        self.dispatch(path, request).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.dispatch(path, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::DELETE, path);
        self.dispatch(path, request).await
    }

    /// Sends the request and normalizes everything the backend can throw at
    /// us into [`ApiError`] or a deserialized `T`.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(classify_transport)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.handle_unauthorized(path));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body, status);
            warn!("backend returned {} for {}: {}", status, path, message);
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = response.json().await.map_err(classify_body)?;

        // A 2xx body can still carry a failure envelope.
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let message = backend_message(&value)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            warn!("backend envelope reported failure for {}: {}", path, message);
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        debug!("{} {} ok", path, status);
        deserialize_payload(value)
    }

    /// A 401 means the session is dead. Outside the chatbot the token is
    /// cleared and the user is bounced to login; the chatbot keeps whatever
    /// session state exists and reports the error to its caller instead.
    fn handle_unauthorized(&self, path: &str) -> ApiError {
        if path.starts_with(CHATBOT_PREFIX) {
            debug!("401 from {}: chatbot handles login prompts inline", path);
        } else {
            warn!("401 from {}: clearing session, redirecting to login", path);
            self.store.remove();
            self.navigator.redirect(LOGIN_REDIRECT);
        }
        ApiError::Unauthorized
    }
}

/// Maps failures to send the request at all.
fn classify_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_builder() {
        ApiError::Setup(err.to_string())
    } else {
        ApiError::Network
    }
}

/// Maps failures while reading or parsing a 2xx body.
fn classify_body(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Network
    }
}

/// Pulls a human-readable message out of an error body. Backends answer
/// with `error` or `message` fields depending on the endpoint.
fn backend_message(value: &Value) -> Option<String> {
    for key in ["error", "message"] {
        if let Some(message) = value.get(key).and_then(Value::as_str) {
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}

fn extract_error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(backend_message)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

/// Deserializes the payload, unwrapping a `data` envelope member first when
/// one is present. The check that `data` is an object or array keeps scalar
/// fields that merely happen to be named `data` out of the unwrap path.
fn deserialize_payload<T: DeserializeOwned>(mut value: Value) -> Result<T, ApiError> {
    if let Some(data) = value.get_mut("data") {
        if data.is_object() || data.is_array() {
            return serde_json::from_value(data.take())
                .map_err(|err| ApiError::Decode(err.to_string()));
        }
    }
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}
