//! Login, registration, logout, and the authenticated-user lookup.
//!
//! This is the only service allowed to write the session: a successful login
//! or registration persists the returned token, logout removes it. Everyone
//! else just reads the session through [`ApiClient`](crate::api_client::ApiClient).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::services::non_empty;
use crate::session::TokenStore;

const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// What the backend knows about the logged-in account.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A login or registration that actually produced a session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user: Option<UserSummary>,
}

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    store: TokenStore,
}

impl AuthService {
    pub fn new(client: ApiClient, store: TokenStore) -> Self {
        AuthService { client, store }
    }

    /// Exchanges credentials for a session and persists the token.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        let response: AuthResponse = self.client.post("/auth/login", credentials).await?;
        self.accept(response, "Login failed")
    }

    /// Creates an account, then persists the session token it returns.
    /// Field checks mirror the signup form so bad input never leaves the
    /// machine.
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError> {
        let name = non_empty(&registration.name, "All fields are required")?;
        let email = non_empty(&registration.email, "All fields are required")?;
        let password = non_empty(&registration.password, "All fields are required")?;
        if !valid_email(&email) {
            return Err(ApiError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ApiError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let body = Registration {
            email,
            name,
            password,
        };
        let response: AuthResponse = self.client.post("/auth/register", &body).await?;
        self.accept(response, "Registration failed")
    }

    /// Ends the session locally. The backend keeps no session state, so
    /// there is nothing to call.
    pub fn logout(&self) {
        self.store.remove();
        info!("session cleared on logout");
    }

    /// Details for the account behind the current token.
    pub async fn user_details(&self) -> Result<UserSummary, ApiError> {
        self.client.get("/auth/user").await
    }

    /// A 2xx auth response without a token is a refusal in disguise; the
    /// envelope error wins over the generic fallback.
    fn accept(&self, response: AuthResponse, fallback: &str) -> Result<AuthSession, ApiError> {
        let Some(token) = response.token else {
            let message = response.error.unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::Backend {
                status: 200,
                message,
            });
        };
        self.store.set(&token);
        info!("session established");
        Ok(AuthSession {
            token,
            user: response.user,
        })
    }
}

/// Same shape the signup form accepts: something@something.tld, no
/// whitespace, exactly one `@`.
fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.find('.') {
        Some(0) | None => false,
        Some(_) => !domain.ends_with('.'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_backend, test_client};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn credentials() -> Credentials {
        Credentials {
            email: "user@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        }
    }

    fn registration() -> Registration {
        Registration {
            email: "user@example.com".to_string(),
            name: "Avery Doe".to_string(),
            password: "longenough".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let app = Router::new().route(
            "/auth/login",
            post(|| async { Json(json!({"token": "jwt.token.here"})) }),
        );
        let base = spawn_backend(app).await;
        let (client, store, _) = test_client(base);
        let auth = AuthService::new(client, store.clone());

        let session = auth.login(&credentials()).await.unwrap();
        assert_eq!(session.token, "jwt.token.here");
        assert_eq!(store.get(), Some("jwt.token.here".to_string()));
    }

    #[tokio::test]
    async fn test_login_without_token_uses_envelope_error() {
        let app = Router::new().route(
            "/auth/login",
            post(|| async { Json(json!({"error": "Invalid credentials"})) }),
        );
        let base = spawn_backend(app).await;
        let (client, store, _) = test_client(base);
        let auth = AuthService::new(client, store.clone());

        let err = auth.login(&credentials()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!store.has());
    }

    #[tokio::test]
    async fn test_login_without_token_or_error_falls_back() {
        let app = Router::new().route("/auth/login", post(|| async { Json(json!({})) }));
        let base = spawn_backend(app).await;
        let (client, store, _) = test_client(base);
        let auth = AuthService::new(client, store);

        let err = auth.login(&credentials()).await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
    }

    #[tokio::test]
    async fn test_register_posts_expected_fields() {
        async fn handler(Json(body): Json<Value>) -> Json<Value> {
            assert_eq!(body["email"], "user@example.com");
            assert_eq!(body["name"], "Avery Doe");
            assert_eq!(body["password"], "longenough");
            Json(json!({"token": "fresh.token.sig", "user": {"name": "Avery Doe"}}))
        }
        let base = spawn_backend(Router::new().route("/auth/register", post(handler))).await;
        let (client, store, _) = test_client(base);
        let auth = AuthService::new(client, store.clone());

        let session = auth.register(&registration()).await.unwrap();
        assert_eq!(session.user.unwrap().name.as_deref(), Some("Avery Doe"));
        assert!(store.has());
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        // Unreachable backend proves validation fires before any request.
        let (client, store, _) = test_client("http://127.0.0.1:9".to_string());
        let auth = AuthService::new(client, store);

        let mut reg = registration();
        reg.name = "   ".to_string();
        let err = auth.register(&reg).await.unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let (client, store, _) = test_client("http://127.0.0.1:9".to_string());
        let auth = AuthService::new(client, store);

        let mut reg = registration();
        reg.email = "not-an-email".to_string();
        let err = auth.register(&reg).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let (client, store, _) = test_client("http://127.0.0.1:9".to_string());
        let auth = AuthService::new(client, store);

        let mut reg = registration();
        reg.password = "short".to_string();
        let err = auth.register(&reg).await.unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (client, store, _) = test_client("http://127.0.0.1:9".to_string());
        store.set("jwt.token.here");
        let auth = AuthService::new(client, store.clone());

        auth.logout();
        assert!(!store.has());
    }

    #[tokio::test]
    async fn test_user_details_unwraps_data_envelope() {
        let app = Router::new().route(
            "/auth/user",
            get(|| async {
                Json(json!({"success": true, "data": {"fullName": "Avery Doe", "email": "user@example.com"}}))
            }),
        );
        let base = spawn_backend(app).await;
        let (client, store, _) = test_client(base);
        let auth = AuthService::new(client, store);

        let user = auth.user_details().await.unwrap();
        assert_eq!(user.name.as_deref(), Some("Avery Doe"));
        assert_eq!(user.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_valid_email_shapes() {
        assert!(valid_email("a@b.c"));
        assert!(valid_email("first.last@sub.domain.org"));
        assert!(!valid_email("plain"));
        assert!(!valid_email("@b.c"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a@.c"));
        assert!(!valid_email("a@b."));
        assert!(!valid_email("a b@c.d"));
        assert!(!valid_email("a@b@c.d"));
    }
}
