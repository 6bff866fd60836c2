//! # Domain Entities
//!
//! The swap record and its read-only snapshot.

use super::errors::{Address, EscrowError, Hash, SwapId};
use super::invariants::{
    invariant_all_or_nothing, invariant_expired, invariant_not_expired,
    invariant_secret_matches, invariant_unsettled,
};
use super::value_objects::{Balance, Settlement, SettlementKind, SwapState};
use serde::{Deserialize, Serialize};

/// Hashed-timelock escrow record.
///
/// Fields are private: `secret_hash` and `expiry` never change after
/// creation, and `locked_funds` only moves through [`Swap::redeem`] or
/// [`Swap::refund`].
#[derive(Debug, Serialize)]
pub struct Swap {
    id: SwapId,
    sender: Address,
    receiver: Address,
    amount: u64,
    secret_hash: Hash,
    locked_funds: Balance,
    expiry: u64,
    created_at: u64,
    settlement: Option<Settlement>,
}

/// Parameters for locking a new swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapParams {
    /// Ledger-assigned identifier.
    pub id: SwapId,
    /// Funder, may refund after expiry.
    pub sender: Address,
    /// Payout destination on redeem.
    pub receiver: Address,
    /// Amount to lock.
    pub amount: u64,
    /// Digest of the secret.
    pub secret_hash: Hash,
    /// Absolute deadline (ms).
    pub expiry: u64,
    /// Creation timestamp (ms).
    pub created_at: u64,
}

impl Swap {
    /// Lock `params.amount` out of `funding` into a new swap.
    ///
    /// `funding` is untouched when this fails.
    pub fn lock(params: SwapParams, funding: &mut Balance) -> Result<Self, EscrowError> {
        if params.amount == 0 {
            return Err(EscrowError::ZeroAmount);
        }
        let locked_funds = funding.split(params.amount)?;

        Ok(Self {
            id: params.id,
            sender: params.sender,
            receiver: params.receiver,
            amount: params.amount,
            secret_hash: params.secret_hash,
            locked_funds,
            expiry: params.expiry,
            created_at: params.created_at,
            settlement: None,
        })
    }

    /// Record identifier.
    pub fn id(&self) -> &SwapId {
        &self.id
    }

    /// Funder.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// Payout destination on redeem.
    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    /// Amount locked at creation.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Hashlock.
    pub fn secret_hash(&self) -> &Hash {
        &self.secret_hash
    }

    /// Deadline (ms).
    pub fn expiry(&self) -> u64 {
        self.expiry
    }

    /// Currently locked quantity.
    pub fn locked_value(&self) -> u64 {
        self.locked_funds.value()
    }

    /// Settlement audit tag.
    pub fn settlement(&self) -> Option<Settlement> {
        self.settlement
    }

    /// Check if the swap is expired.
    pub fn is_expired(&self, current_time: u64) -> bool {
        current_time >= self.expiry
    }

    /// Check if the swap is settled.
    pub fn is_settled(&self) -> bool {
        self.locked_funds.is_zero()
    }

    /// Current state, derived from the locked balance.
    pub fn state(&self) -> SwapState {
        if self.is_settled() {
            SwapState::Settled
        } else {
            SwapState::Active
        }
    }

    /// Release the locked funds with the digest of the revealed secret.
    ///
    /// Checks: not expired, digest matches, not settled.
    pub fn redeem(&mut self, secret_digest: &Hash, current_time: u64) -> Result<Balance, EscrowError> {
        invariant_not_expired(current_time, self.expiry)?;
        if !invariant_secret_matches(secret_digest, &self.secret_hash) {
            return Err(EscrowError::SecretMismatch);
        }
        invariant_unsettled(self.locked_value())?;

        Ok(self.settle(SettlementKind::Redeemed, current_time))
    }

    /// Release the locked funds back to the sender.
    ///
    /// Checks: expired, not settled.
    pub fn refund(&mut self, current_time: u64) -> Result<Balance, EscrowError> {
        invariant_expired(current_time, self.expiry)?;
        invariant_unsettled(self.locked_value())?;

        Ok(self.settle(SettlementKind::Refunded, current_time))
    }

    fn settle(&mut self, kind: SettlementKind, current_time: u64) -> Balance {
        debug_assert!(self.state().can_transition_to(SwapState::Settled));
        let payout = self.locked_funds.withdraw_all();
        self.settlement = Some(Settlement {
            kind,
            settled_at: current_time,
        });
        debug_assert!(invariant_all_or_nothing(self.locked_value(), self.amount));
        payout
    }

    /// Consume an unpublished swap, handing back its funds.
    pub(crate) fn into_locked_funds(self) -> Balance {
        self.locked_funds
    }

    /// Read-only view of the record.
    pub fn snapshot(&self) -> SwapSnapshot {
        SwapSnapshot {
            id: self.id,
            sender: self.sender,
            receiver: self.receiver,
            amount: self.amount,
            secret_hash: self.secret_hash,
            locked_funds: self.locked_value(),
            expiry: self.expiry,
            created_at: self.created_at,
            settlement: self.settlement,
        }
    }
}

/// Point-in-time copy of a swap record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSnapshot {
    /// Record identifier.
    pub id: SwapId,
    /// Funder.
    pub sender: Address,
    /// Payout destination on redeem.
    pub receiver: Address,
    /// Amount locked at creation.
    pub amount: u64,
    /// Hashlock.
    pub secret_hash: Hash,
    /// Locked quantity at snapshot time.
    pub locked_funds: u64,
    /// Deadline (ms).
    pub expiry: u64,
    /// Creation timestamp (ms).
    pub created_at: u64,
    /// Settlement audit tag.
    pub settlement: Option<Settlement>,
}

impl SwapSnapshot {
    /// Check if the swap is expired.
    pub fn is_expired(&self, current_time: u64) -> bool {
        current_time >= self.expiry
    }

    /// Check if the swap is settled.
    pub fn is_settled(&self) -> bool {
        self.locked_funds == 0
    }
}

/// Outcome of a successful settlement step on the ledger.
#[derive(Debug)]
pub struct SettlementReceipt {
    /// Funds released from the record.
    pub payout: Balance,
    /// Record state right after settlement.
    pub swap: SwapSnapshot,
}
