// SPDX-License-Identifier: MIT

//! Process-wide authentication session.
//!
//! The bearer token is created at login, destroyed at logout, and read-only
//! from the perspective of feature code. Clones share the same token.

use std::sync::{Arc, RwLock};

/// Shared bearer-token holder injected into every network-calling component.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthSession {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that is already authenticated.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.login(token);
        session
    }

    /// Store the token obtained at login.
    pub fn login(&self, token: impl Into<String>) {
        let mut guard = self.token.write().expect("session lock poisoned");
        *guard = Some(token.into());
    }

    /// Destroy the session at logout.
    pub fn clear(&self) {
        let mut guard = self.token.write().expect("session lock poisoned");
        *guard = None;
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }
}
