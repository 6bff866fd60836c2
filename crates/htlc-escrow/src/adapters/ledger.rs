//! In-Memory Swap Ledger
//!
//! Implements `SwapLedger` with a map from record id to record behind a
//! single `RwLock`. Holding the write lock for the duration of a
//! settlement step is what makes read-check-mutate atomic.

use crate::domain::{EscrowError, SettlementReceipt, Swap, SwapId, SwapSnapshot};
use crate::ports::outbound::{RejectedSwap, SettleOp, SwapLedger};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};
use uuid::Uuid;

/// In-memory shared record store.
pub struct InMemorySwapLedger {
    records: RwLock<HashMap<SwapId, Swap>>,
    /// Per-ledger salt so ids differ across ledger instances.
    salt: Uuid,
    next_nonce: AtomicU64,
}

impl InMemorySwapLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            salt: Uuid::new_v4(),
            next_nonce: AtomicU64::new(0),
        }
    }

    /// Snapshots of every record, in no particular order.
    pub fn snapshots(&self) -> Vec<SwapSnapshot> {
        self.records.read().values().map(Swap::snapshot).collect()
    }
}

impl Default for InMemorySwapLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a record id from the ledger salt and a nonce.
fn derive_record_id(salt: &Uuid, nonce: u64) -> SwapId {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(nonce.to_le_bytes());

    let result = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&result);
    id
}

impl SwapLedger for InMemorySwapLedger {
    fn new_record_id(&self) -> SwapId {
        let nonce = self.next_nonce.fetch_add(1, Ordering::Relaxed);
        derive_record_id(&self.salt, nonce)
    }

    fn publish(&self, swap: Swap) -> Result<(), Box<RejectedSwap>> {
        let id = *swap.id();
        let mut records = self.records.write();

        if records.contains_key(&id) {
            return Err(Box::new(RejectedSwap {
                swap,
                error: EscrowError::DuplicateSwap(id),
            }));
        }

        info!(
            "[htlc] Published swap {:02x}{:02x}... amount={} expiry={}",
            id[0],
            id[1],
            swap.amount(),
            swap.expiry()
        );
        records.insert(id, swap);
        Ok(())
    }

    fn update(&self, id: &SwapId, op: SettleOp<'_>) -> Result<SettlementReceipt, EscrowError> {
        let mut records = self.records.write();
        let swap = records
            .get_mut(id)
            .ok_or(EscrowError::SwapNotFound(*id))?;

        let payout = op(&mut *swap)?;
        debug!(
            "[htlc] Settled swap {:02x}{:02x}... payout={}",
            id[0],
            id[1],
            payout.value()
        );

        Ok(SettlementReceipt {
            payout,
            swap: swap.snapshot(),
        })
    }

    fn get(&self, id: &SwapId) -> Option<SwapSnapshot> {
        self.records.read().get(id).map(Swap::snapshot)
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
