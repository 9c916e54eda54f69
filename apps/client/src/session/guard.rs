//! Local authentication check.

use super::token::TokenStore;

/// Answers "is someone logged in right now" from local state alone, no
/// network round-trip. The backend remains the authority; an expired or
/// revoked token that slips past this check is caught by the 401 handling
/// in the API client.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    store: TokenStore,
}

impl SessionGuard {
    pub fn new(store: TokenStore) -> Self {
        SessionGuard { store }
    }

    /// True when a token is stored and its expiry is in the future.
    pub fn is_authenticated(&self) -> bool {
        self.store.has() && !self.store.is_expired()
    }
}
