//! # Timelock Arithmetic
//!
//! Deadline computation for new swaps.

use crate::domain::EscrowError;

/// Milliseconds per hour.
pub const MS_PER_HOUR: u64 = 3_600_000;

/// Absolute expiry for a swap created at `current_time`.
///
/// A ttl of zero yields `expiry == current_time`, so the swap is refundable
/// immediately and never redeemable.
pub fn compute_expiry(current_time: u64, ttl_hours: u64) -> Result<u64, EscrowError> {
    ttl_hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ttl_ms| current_time.checked_add(ttl_ms))
        .ok_or(EscrowError::ExpiryOverflow)
}

/// Reject ttls above the operator's ceiling, if one is set.
pub fn validate_ttl(ttl_hours: u64, max_ttl_hours: Option<u64>) -> Result<(), EscrowError> {
    match max_ttl_hours {
        Some(max) if ttl_hours > max => Err(EscrowError::TtlTooLong {
            requested: ttl_hours,
            max,
        }),
        _ => Ok(()),
    }
}
