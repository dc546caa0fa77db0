//! Authentication gateway
//!
//! Owns the session store and the administrator credentials and decides,
//! per request, which endpoint handles it.
//!
//! # Endpoints
//!
//! ```text
//! OPTIONS *        → 200 (CORS preflight)
//! POST    /login   → issue a bearer token
//! POST    /logout  → invalidate the presented token
//! GET     /admin   → protected resource, bearer token required
//! GET     /        → endpoint discovery
//! *                → 404
//! ```

pub mod reply;
pub mod router;

use crate::auth::{CredentialValidator, SessionStore};
use crate::config::Config;

/// Shared state behind every connection.
pub struct Gateway {
    sessions: SessionStore,
    credentials: CredentialValidator,
}

impl Gateway {
    pub fn new(sessions: SessionStore, credentials: CredentialValidator) -> Self {
        Self {
            sessions,
            credentials,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            SessionStore::from_config(&cfg.sessions),
            CredentialValidator::from_config(&cfg.admin),
        )
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn credentials(&self) -> &CredentialValidator {
        &self.credentials
    }

    /// Opportunistic expiry pass, run once per accepted connection.
    pub fn sweep(&self) -> usize {
        self.sessions.sweep()
    }
}
