//! Client library for the ResumePro career-services backend.
//!
//! The backend does the heavy lifting (resume analysis, job matching, the
//! chatbot); this crate owns the client-side session and transport rules:
//! where the bearer token lives, when it counts as expired, how every
//! request is authorized, and how failures are normalized into one error
//! type. Feature services stay thin on top of that core.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use resumepro_client::services::auth::{AuthService, Credentials};
//! use resumepro_client::{ApiClient, Config, NoopNavigator, SessionGuard, TokenStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let store = TokenStore::on_disk("/tmp/resumepro")?;
//! let client = ApiClient::new(&config, store.clone(), Arc::new(NoopNavigator));
//!
//! let auth = AuthService::new(client.clone(), store.clone());
//! auth.login(&Credentials {
//!     email: "user@example.com".into(),
//!     password: "secret".into(),
//! })
//! .await?;
//!
//! assert!(SessionGuard::new(store).is_authenticated());
//! # Ok(())
//! # }
//! ```

pub mod api_client;
pub mod config;
pub mod errors;
pub mod services;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use api_client::{ApiClient, Navigator, NoopNavigator, LOGIN_REDIRECT};
pub use config::Config;
pub use errors::ApiError;
pub use session::{
    Claims, FileStorage, MemoryStorage, SessionGuard, TokenStorage, TokenStore, TOKEN_KEY,
};
