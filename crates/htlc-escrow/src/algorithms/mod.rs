//! # Algorithms Module
//!
//! Secret handling and timelock arithmetic.

pub mod secret;
pub mod timelock;

pub use secret::{create_hash_lock, generate_random_secret, verify_secret, SECRET_LEN};
pub use timelock::{compute_expiry, validate_ttl, MS_PER_HOUR};
