//! # Secure Secret Type
//!
//! Wrapper for hashlock preimages that zeroizes memory on drop.
//!
//! A secret becomes public the moment a redeem succeeds (the `Redeemed`
//! event carries it), but until then it is the only thing standing between
//! anyone and the locked funds.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret preimage that zeroizes on drop. Serializes as a hex string.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecureSecret {
    #[serde(with = "hex")]
    inner: Vec<u8>,
}

impl SecureSecret {
    /// Create a new secure secret, taking ownership of the bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { inner: bytes }
    }

    /// Create from a slice (copies).
    pub fn from_slice(slice: &[u8]) -> Self {
        Self {
            inner: slice.to_vec(),
        }
    }

    /// Raw preimage bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True for the empty preimage.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for SecureSecret {
    fn from(value: &str) -> Self {
        Self::from_slice(value.as_bytes())
    }
}

impl fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureSecret({} bytes, redacted)", self.inner.len())
    }
}
