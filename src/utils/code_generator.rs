//! Short code generation and validation utilities.
//!
//! Generation draws uniformly from the 62-character alphanumeric alphabet.
//! Collisions are the caller's concern (handled by the service's retry loop);
//! generation itself never checks uniqueness.

use crate::error::AppError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::sync::Mutex;

/// Alphabet for generated codes: `[A-Za-z0-9]`.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Minimum accepted code length, generated or custom.
pub const MIN_CODE_LENGTH: usize = 6;

/// Maximum accepted code length, generated or custom.
pub const MAX_CODE_LENGTH: usize = 8;

/// Random short code generator with an injectable, seedable RNG.
///
/// Holding the RNG behind a mutex keeps generation deterministic under a
/// fixed seed while the generator is shared across request handlers. The
/// lock is never held across an await point.
pub struct CodeGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator producing codes of `length` characters, seeded
    /// from OS entropy.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic generator for tests.
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns a fresh candidate code.
    ///
    /// Uniform selection per character, with replacement. Not
    /// cryptographically secure; collision probability is managed by the
    /// service's retry loop, not by a larger keyspace.
    pub fn generate(&self) -> String {
        let mut rng = self.rng.lock().expect("code generator RNG poisoned");

        (0..self.length)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }
}

/// Validates a user-provided custom short code.
///
/// Accepts 6-8 ASCII alphanumeric characters, nothing else.
///
/// # Errors
///
/// Returns [`AppError::InvalidCode`] if the pattern is violated.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_CODE_LENGTH || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::invalid_code(
            "Code must be 6-8 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::invalid_code(
            "Code can only contain letters and digits",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
