//! # Domain Errors
//!
//! Error types for the escrow engine. Every variant is caller-visible and
//! aborts the attempted operation without touching any record.

use thiserror::Error;

/// Hash type (32-byte digest).
pub type Hash = [u8; 32];

/// Address type (32-byte principal).
pub type Address = [u8; 32];

/// Swap record identifier, assigned by the ledger.
pub type SwapId = [u8; 32];

/// Escrow error types.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EscrowError {
    /// Funding balance is smaller than the requested amount.
    #[error("Insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance {
        /// Value held by the funding balance
        available: u64,
        /// Amount the caller asked to lock
        requested: u64,
    },

    /// Redeem attempted at or after expiry.
    #[error("Swap expired")]
    SwapExpired,

    /// Refund attempted before expiry.
    #[error("Swap not expired (cannot refund)")]
    SwapNotExpired,

    /// Supplied secret does not hash to the stored hashlock.
    #[error("Secret does not match hashlock")]
    SecretMismatch,

    /// Locked funds are already zero.
    #[error("Swap already settled")]
    AlreadySettled,

    /// No record with this id.
    #[error("Swap not found: {}", hex::encode(.0))]
    SwapNotFound(SwapId),

    /// Ledger already holds a record with this id.
    #[error("Duplicate swap: {}", hex::encode(.0))]
    DuplicateSwap(SwapId),

    /// Create called with a zero amount.
    #[error("Amount must be non-zero")]
    ZeroAmount,

    /// `now + ttl` does not fit in u64 milliseconds.
    #[error("Expiry overflows u64 milliseconds")]
    ExpiryOverflow,

    /// Requested ttl exceeds the configured maximum.
    #[error("TTL too long: {requested}h requested, max {max}h")]
    TtlTooLong {
        /// Requested ttl in hours
        requested: u64,
        /// Configured maximum in hours
        max: u64,
    },
}

impl EscrowError {
    /// Stable error code for client tooling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::SwapExpired => "SWAP_EXPIRED",
            Self::SwapNotExpired => "SWAP_NOT_EXPIRED",
            Self::SecretMismatch => "SECRET_MISMATCH",
            Self::AlreadySettled => "ALREADY_SETTLED",
            Self::SwapNotFound(_) => "SWAP_NOT_FOUND",
            Self::DuplicateSwap(_) => "DUPLICATE_SWAP",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::ExpiryOverflow => "EXPIRY_OVERFLOW",
            Self::TtlTooLong { .. } => "TTL_TOO_LONG",
        }
    }
}
