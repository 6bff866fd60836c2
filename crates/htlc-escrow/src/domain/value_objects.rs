//! # Domain Value Objects
//!
//! Balances, settlement tags and the swap state machine.

use super::errors::EscrowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A quantity of the escrowed asset.
///
/// Balances are linear: not `Clone`, only created by a vault, and moved
/// rather than copied. The sum of all live balances never exceeds the
/// supply the vault has minted, so `join` cannot overflow.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    value: u64,
}

impl Balance {
    /// An empty balance.
    pub fn zero() -> Self {
        Self { value: 0 }
    }

    pub(crate) fn new(value: u64) -> Self {
        Self { value }
    }

    /// Quantity held.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// True when nothing is held.
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Split `amount` out into a new balance.
    pub fn split(&mut self, amount: u64) -> Result<Balance, EscrowError> {
        if self.value < amount {
            return Err(EscrowError::InsufficientBalance {
                available: self.value,
                requested: amount,
            });
        }
        self.value -= amount;
        Ok(Balance::new(amount))
    }

    /// Merge another balance into this one, returning the new value.
    pub fn join(&mut self, other: Balance) -> u64 {
        self.value += other.value;
        self.value
    }

    /// Take everything, leaving zero behind.
    pub fn withdraw_all(&mut self) -> Balance {
        let value = std::mem::take(&mut self.value);
        Balance::new(value)
    }
}

/// Swap state machine.
///
/// Derived from the locked balance, never stored on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapState {
    /// Funds locked, awaiting redeem or refund.
    #[default]
    Active,
    /// Locked balance is zero.
    Settled,
}

impl SwapState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: SwapState) -> bool {
        matches!((self, next), (Self::Active, Self::Settled))
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

/// Which path settled a swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementKind {
    /// Secret revealed, funds paid to the receiver.
    Redeemed,
    /// Deadline passed, funds returned to the sender.
    Refunded,
}

/// Audit tag written in the same step that zeroes the balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Settlement path.
    pub kind: SettlementKind,
    /// Clock reading at settlement (ms).
    pub settled_at: u64,
}

/// Hash function used for hashlocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256.
    #[default]
    Sha256,
    /// SHA3-256.
    Sha3_256,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => f.write_str("sha256"),
            Self::Sha3_256 => f.write_str("sha3_256"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha3_256" | "sha3" => Ok(Self::Sha3_256),
            other => Err(format!("unknown hash algorithm: {other}")),
        }
    }
}
