//! Opaque bearer token generation

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of every issued token, in characters.
pub const TOKEN_LEN: usize = 63;

/// Produces fixed-length alphanumeric tokens.
///
/// Backed by a CSPRNG seeded once from OS entropy at construction; the
/// generator is kept for the lifetime of its owner and never reseeded.
#[derive(Debug)]
pub struct TokenGenerator {
    rng: StdRng,
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: StdRng::from_seed(seed),
        }
    }

    pub fn generate(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect()
    }
}
