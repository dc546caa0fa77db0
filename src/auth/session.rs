//! In-memory session store
//!
//! Sessions are appended to a bounded list and never removed: expiry and
//! logout only flip `active` to false. Once the store has issued
//! `capacity` sessions, further logins are rejected until the process
//! restarts.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::auth::token::TokenGenerator;
use crate::config::SessionConfig;
use crate::error::GatewayError;

/// A server-side record of one successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub created_at: Instant,
    pub active: bool,
}

impl Session {
    fn new(token: String, created_at: Instant) -> Self {
        Self {
            token,
            created_at,
            active: true,
        }
    }

    /// Whether the session has reached its timeout as of `now`.
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= timeout
    }

    pub fn is_valid(&self, now: Instant, timeout: Duration) -> bool {
        self.active && !self.is_expired(now, timeout)
    }

    /// Marks the session inactive. There is no way back.
    fn deactivate(&mut self) {
        self.active = false;
    }
}

struct Inner {
    sessions: Vec<Session>,
    /// token -> position in `sessions`
    index: HashMap<String, usize>,
    tokens: TokenGenerator,
}

/// Thread-safe bounded session registry.
pub struct SessionStore {
    inner: Mutex<Inner>,
    capacity: usize,
    timeout: Duration,
}

impl SessionStore {
    pub fn new(capacity: usize, timeout: Duration) -> Self {
        Self::with_generator(capacity, timeout, TokenGenerator::new())
    }

    pub fn with_generator(capacity: usize, timeout: Duration, tokens: TokenGenerator) -> Self {
        Self {
            inner: Mutex::new(Inner {
                sessions: Vec::with_capacity(capacity),
                index: HashMap::with_capacity(capacity),
                tokens,
            }),
            capacity,
            timeout,
        }
    }

    pub fn from_config(cfg: &SessionConfig) -> Self {
        Self::new(cfg.capacity, Duration::from_secs(cfg.timeout_secs))
    }

    /// Number of sessions ever issued (active or not).
    pub fn len(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of sessions currently valid.
    pub fn active_count(&self) -> usize {
        let now = Instant::now();
        self.inner
            .lock()
            .sessions
            .iter()
            .filter(|s| s.is_valid(now, self.timeout))
            .count()
    }

    /// Issues a new session and returns its token.
    pub fn create(&self) -> Result<String, GatewayError> {
        self.create_at(Instant::now())
    }

    pub fn create_at(&self, now: Instant) -> Result<String, GatewayError> {
        let mut inner = self.inner.lock();

        if inner.sessions.len() >= self.capacity {
            tracing::warn!(capacity = self.capacity, "Session store full, rejecting login");
            return Err(GatewayError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let token = loop {
            let candidate = inner.tokens.generate();
            if !inner.index.contains_key(&candidate) {
                break candidate;
            }
        };

        let slot = inner.sessions.len();
        inner.sessions.push(Session::new(token.clone(), now));
        inner.index.insert(token.clone(), slot);

        tracing::debug!(slot, issued = slot + 1, "Session created");
        Ok(token)
    }

    /// True iff `token` names an active, unexpired session.
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Instant::now())
    }

    pub fn validate_at(&self, token: &str, now: Instant) -> bool {
        let inner = self.inner.lock();
        inner
            .index
            .get(token)
            .map(|&slot| inner.sessions[slot].is_valid(now, self.timeout))
            .unwrap_or(false)
    }

    /// Deactivates every session that has reached its timeout.
    ///
    /// Returns how many sessions were deactivated by this call.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut inner = self.inner.lock();
        let mut expired = 0;

        for session in inner.sessions.iter_mut() {
            if session.active && session.is_expired(now, self.timeout) {
                session.deactivate();
                expired += 1;
            }
        }

        if expired > 0 {
            tracing::debug!(expired, "Swept expired sessions");
        }
        expired
    }

    /// Ends a session early (logout).
    ///
    /// Returns false if the token was not valid to begin with.
    pub fn invalidate(&self, token: &str) -> bool {
        self.invalidate_at(token, Instant::now())
    }

    pub fn invalidate_at(&self, token: &str, now: Instant) -> bool {
        let mut inner = self.inner.lock();
        let Some(&slot) = inner.index.get(token) else {
            return false;
        };

        let session = &mut inner.sessions[slot];
        if !session.is_valid(now, self.timeout) {
            return false;
        }
        session.deactivate();
        true
    }

    /// Snapshot of all stored sessions (for monitoring/debugging).
    pub fn sessions(&self) -> Vec<Session> {
        self.inner.lock().sessions.clone()
    }
}
