//! Persisted bearer token and its decoded claims.
//!
//! The token is an opaque string handed out by the backend at login. It
//! happens to be a JWT, and the client reads its payload purely for display
//! and expiry checks. Signature verification is the server's job; nothing
//! here treats decoded claims as proof of anything.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::storage::{FileStorage, MemoryStorage, TokenStorage};

/// Storage key under which the session token lives. Every reader and writer
/// goes through [`TokenStore`], so this is the only place the key appears.
pub const TOKEN_KEY: &str = "resume_pro_token";

/// Claims the client actually uses from the token payload. Anything else in
/// the payload is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(default, deserialize_with = "de_user_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// Backends have issued both string and numeric user ids; accept either.
fn de_user_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

#[derive(Debug, Error)]
enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Format,
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the payload segment of a JWT without verifying the signature.
fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimsError::Format);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Handle to the persisted session token. Cloning shares the backend.
///
/// Persistence failures are logged and swallowed: a token that fails to
/// write degrades the session to "logged out", it does not fail the request
/// that produced it.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn TokenStorage>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("present", &self.has())
            .finish()
    }
}

impl TokenStore {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        TokenStore { storage }
    }

    /// Store backed by process memory only; the session ends with the process.
    pub fn in_memory() -> Self {
        TokenStore::new(Arc::new(MemoryStorage::new()))
    }

    /// Store backed by files under `root`, surviving restarts.
    pub fn on_disk(root: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(TokenStore::new(Arc::new(FileStorage::new(
            root.as_ref().to_path_buf(),
        )?)))
    }

    /// Current token, if one is stored and readable.
    pub fn get(&self) -> Option<String> {
        match self.storage.read(TOKEN_KEY) {
            Ok(token) => token,
            Err(err) => {
                tracing::error!("failed to read session token: {err}");
                None
            }
        }
    }

    /// Persist a token, replacing any previous one.
    pub fn set(&self, token: &str) {
        if let Err(err) = self.storage.write(TOKEN_KEY, token) {
            tracing::error!("failed to persist session token: {err}");
        }
    }

    /// Drop the stored token. Removing an absent token is a no-op.
    pub fn remove(&self) {
        if let Err(err) = self.storage.delete(TOKEN_KEY) {
            tracing::error!("failed to remove session token: {err}");
        }
    }

    pub fn has(&self) -> bool {
        self.get().is_some()
    }

    /// Claims from the stored token. A stored token that does not decode is
    /// garbage from a past version or a tampered store; it is removed so the
    /// session reads consistently as logged out afterwards.
    pub fn decode(&self) -> Option<Claims> {
        let token = self.get()?;
        match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::warn!("discarding undecodable session token: {err}");
                self.remove();
                None
            }
        }
    }

    /// Whether the stored token has expired. Missing and undecodable tokens
    /// count as expired.
    pub fn is_expired(&self) -> bool {
        match self.decode() {
            Some(claims) => claims.exp <= Utc::now().timestamp(),
            None => true,
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.decode()?.user_id
    }

    pub fn user_email(&self) -> Option<String> {
        self.decode()?.email
    }
}
