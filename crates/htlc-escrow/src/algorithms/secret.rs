//! # Secret Generation and Verification
//!
//! Helpers for parties preparing a swap: pick a preimage, derive its
//! hashlock, check a candidate against it.

use crate::domain::{invariant_secret_matches, Hash, SecureSecret};
use crate::ports::SecretHasher;
use rand::RngCore;

/// Length of generated secrets in bytes.
pub const SECRET_LEN: usize = 32;

/// Generate a cryptographically secure random secret.
pub fn generate_random_secret() -> SecureSecret {
    let mut bytes = vec![0u8; SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    SecureSecret::new(bytes)
}

/// Create a hashlock from a secret.
pub fn create_hash_lock(hasher: &dyn SecretHasher, secret: &SecureSecret) -> Hash {
    hasher.digest(secret.as_bytes())
}

/// Verify that a secret matches a hashlock.
pub fn verify_secret(hasher: &dyn SecretHasher, secret: &SecureSecret, hash_lock: &Hash) -> bool {
    let computed = create_hash_lock(hasher, secret);
    invariant_secret_matches(&computed, hash_lock)
}
