//! # Domain Invariants
//!
//! Business rules for the escrow engine. The settlement guards are applied
//! in a fixed order so the reported failure is deterministic.

use super::errors::{EscrowError, Hash};

/// Invariant: Redeem window.
///
/// Redeem is only valid strictly before expiry.
pub fn invariant_not_expired(current_time: u64, expiry: u64) -> Result<(), EscrowError> {
    if current_time >= expiry {
        return Err(EscrowError::SwapExpired);
    }
    Ok(())
}

/// Invariant: Refund window.
///
/// Refund is only valid at or after expiry. Together with
/// [`invariant_not_expired`] every timestamp falls in exactly one window.
pub fn invariant_expired(current_time: u64, expiry: u64) -> Result<(), EscrowError> {
    if current_time < expiry {
        return Err(EscrowError::SwapNotExpired);
    }
    Ok(())
}

/// Invariant: Secret matches hashlock.
///
/// Compares the full digest without early exit.
pub fn invariant_secret_matches(digest: &Hash, hash_lock: &Hash) -> bool {
    digest
        .iter()
        .zip(hash_lock.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Invariant: Funds still locked.
pub fn invariant_unsettled(locked: u64) -> Result<(), EscrowError> {
    if locked == 0 {
        return Err(EscrowError::AlreadySettled);
    }
    Ok(())
}

/// Invariant: All or nothing.
///
/// Locked funds are either the full amount or zero.
pub fn invariant_all_or_nothing(locked: u64, amount: u64) -> bool {
    locked == amount || locked == 0
}
