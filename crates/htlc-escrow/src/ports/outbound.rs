//! # Outbound Ports
//!
//! Traits for the engine's external collaborators: the ledger that stores
//! records, the asset vault, the clock and the hash function, plus the
//! event sink.

use crate::domain::{
    Address, Balance, EscrowError, EscrowEvent, Hash, HashAlgorithm, SettlementReceipt, Swap,
    SwapId, SwapSnapshot,
};
use async_trait::async_trait;

/// Settlement step run by [`SwapLedger::update`] while the record is held.
pub type SettleOp<'a> = &'a mut (dyn FnMut(&mut Swap) -> Result<Balance, EscrowError> + Send);

/// Shared record store - outbound port.
///
/// Every record is addressable and mutable by any party; access control is
/// left to the settlement guards.
pub trait SwapLedger: Send + Sync {
    /// Issue a fresh, never-before-seen record id.
    fn new_record_id(&self) -> SwapId;

    /// Make a record globally visible.
    ///
    /// On rejection the swap is handed back so its funds are not lost.
    fn publish(&self, swap: Swap) -> Result<(), Box<RejectedSwap>>;

    /// Atomic read-check-mutate on one record.
    ///
    /// `op` runs with exclusive access to the record. If it returns `Err`
    /// the record must be left exactly as it was.
    fn update(&self, id: &SwapId, op: SettleOp<'_>) -> Result<SettlementReceipt, EscrowError>;

    /// Read-only view of a record.
    fn get(&self, id: &SwapId) -> Option<SwapSnapshot>;

    /// Number of records held.
    fn len(&self) -> usize;

    /// True when no record has been published.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A swap the ledger refused to publish.
#[derive(Debug)]
pub struct RejectedSwap {
    /// The swap, still holding its funds.
    pub swap: Swap,
    /// Why it was refused.
    pub error: EscrowError,
}

/// Asset transfer primitive - outbound port.
pub trait AssetVault: Send + Sync {
    /// Credit `balance` to `destination`. The balance is consumed.
    fn transfer(&self, balance: Balance, destination: &Address);

    /// Quantity credited to `owner`.
    fn balance_of(&self, owner: &Address) -> u64;
}

/// Trusted time source - outbound port.
///
/// Must be monotonic for the lifetime of a record.
pub trait Clock: Send + Sync {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// One-way hash function - outbound port.
pub trait SecretHasher: Send + Sync {
    /// Full digest of `bytes`.
    fn digest(&self, bytes: &[u8]) -> Hash;

    /// Algorithm in use.
    fn algorithm(&self) -> HashAlgorithm;
}

/// Event sink - outbound port.
#[async_trait]
pub trait EscrowEventPublisher: Send + Sync {
    /// Publish an event.
    ///
    /// Returns the number of subscribers that received it.
    async fn publish(&self, event: EscrowEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}
