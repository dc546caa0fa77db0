//! Administrator credential check

use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

use crate::config::AdminConfig;

/// Checks submitted credentials against the single administrator identity.
///
/// Both sides are digested before comparison so the check takes the same
/// time regardless of where (or whether) the inputs diverge, including
/// their length.
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    username: [u8; 32],
    password: [u8; 32],
}

impl CredentialValidator {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: digest(username),
            password: digest(password),
        }
    }

    pub fn from_config(admin: &AdminConfig) -> Self {
        Self::new(&admin.username, &admin.password)
    }

    /// Returns true iff both fields match exactly (case-sensitive).
    pub fn check(&self, username: &str, password: &str) -> bool {
        let user: Choice = digest(username)[..].ct_eq(&self.username[..]);
        let pass: Choice = digest(password)[..].ct_eq(&self.password[..]);
        (user & pass).unwrap_u8() == 1
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}
