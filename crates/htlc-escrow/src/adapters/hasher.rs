//! Hash Adapters
//!
//! Implement the `SecretHasher` port over `sha2` and `sha3`.

use crate::domain::{Hash, HashAlgorithm};
use crate::ports::outbound::SecretHasher;
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// SHA-256 hashlocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl SecretHasher for Sha256Hasher {
    fn digest(&self, bytes: &[u8]) -> Hash {
        Sha256::digest(bytes).into()
    }

    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }
}

/// SHA3-256 hashlocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha3Hasher;

impl SecretHasher for Sha3Hasher {
    fn digest(&self, bytes: &[u8]) -> Hash {
        Sha3_256::digest(bytes).into()
    }

    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha3_256
    }
}
