use std::time::Duration;

/// Production backend base URL, used when `RESUMEPRO_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://finalyearmcabackend.onrender.com/api";

/// Fixed per-request timeout. Not environment-configurable; tests construct
/// a `Config` directly when they need a shorter one.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration. No variable is required: with an empty environment
/// the client talks to the production backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config {
            base_url: std::env::var("RESUMEPRO_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}
