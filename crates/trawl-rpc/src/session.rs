//! Rotating anti-forgery token shared across calls.

use std::sync::{PoisonError, RwLock};

/// Holds the daemon's current `X-Transmission-Session-Id` value.
///
/// Reads happen on every call; writes only when the daemon answers 409 with a
/// fresh token. The token starts empty and lives for the client's lifetime.
#[derive(Debug, Default)]
pub(crate) struct SessionStore {
    token: RwLock<String>,
}

impl SessionStore {
    /// Current token; empty until the daemon has issued one.
    pub(crate) fn get(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the token with the value from a rotation response.
    pub(crate) fn set(&self, token: String) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
