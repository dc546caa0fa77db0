//! Gateway configuration
//!
//! Values come from an optional YAML file (path in `BASTION_CONFIG`),
//! then individual environment variables override them.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

pub const DEFAULT_ADMIN_PASSWORD: &str = "your_secure_password";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub sessions: SessionConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// How long a client may take to send its request
    pub read_timeout_secs: u64,
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 30,
            max_request_bytes: 4096,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of sessions issued over the process lifetime
    pub capacity: usize,
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            timeout_secs: 3600,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

// Keep the password out of debug output.
impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `BASTION_CONFIG` (if set) and the process
    /// environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("BASTION_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies environment-style overrides; `lookup` returns the value of a
    /// variable if it is set.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Some(capacity) = lookup("SESSION_CAPACITY") {
            self.sessions.capacity = capacity
                .parse()
                .with_context(|| format!("SESSION_CAPACITY={capacity:?} is not a number"))?;
        }
        if let Some(timeout) = lookup("SESSION_TIMEOUT_SECS") {
            self.sessions.timeout_secs = timeout
                .parse()
                .with_context(|| format!("SESSION_TIMEOUT_SECS={timeout:?} is not a number"))?;
        }
        if let Some(username) = lookup("ADMIN_USERNAME") {
            self.admin.username = username;
        }
        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.admin.password = password;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sessions.capacity == 0 {
            bail!("sessions.capacity must be at least 1");
        }
        if self.sessions.timeout_secs == 0 {
            bail!("sessions.timeout_secs must be at least 1");
        }
        if self.admin.username.is_empty() {
            bail!("admin.username must not be empty");
        }
        if self.server.max_request_bytes == 0 {
            bail!("server.max_request_bytes must be at least 1");
        }
        Ok(())
    }

    pub fn uses_default_password(&self) -> bool {
        self.admin.password == DEFAULT_ADMIN_PASSWORD
    }
}
