//! Shared fixtures for the in-crate tests: a loopback backend, a canned
//! client wiring, and token builders.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::{ApiClient, Navigator};
use crate::config::Config;
use crate::session::TokenStore;

/// Structured logging for tests; later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Navigator that records redirect targets instead of navigating.
#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    targets: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, location: &str) {
        self.targets.lock().unwrap().push(location.to_string());
    }
}

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub(crate) async fn spawn_backend(router: Router) -> String {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Config pointed at a test backend, with a timeout short enough to keep
/// failing tests fast.
pub(crate) fn test_config(base_url: String) -> Config {
    Config {
        base_url,
        timeout: Duration::from_secs(5),
    }
}

/// Fresh client plus handles to its session store and recorded redirects.
pub(crate) fn test_client(base_url: String) -> (ApiClient, TokenStore, Arc<RecordingNavigator>) {
    init_tracing();
    let store = TokenStore::in_memory();
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(&test_config(base_url), store.clone(), navigator.clone());
    (client, store, navigator)
}

/// Unsigned JWT-shaped token with the given claims payload.
pub(crate) fn make_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.signature")
}

/// Token for a fixed test user whose expiry sits `secs` from now.
pub(crate) fn token_expiring_in(secs: i64) -> String {
    make_token(serde_json::json!({
        "user_id": "user-1",
        "email": "user@example.com",
        "exp": chrono::Utc::now().timestamp() + secs,
    }))
}
