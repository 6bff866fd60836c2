//! # Inbound Ports
//!
//! API trait defining what the escrow engine can do. `create`, `redeem` and
//! `refund` are the only state-changing entry points.

use crate::domain::{Address, Balance, EscrowError, Hash, SecureSecret, SwapId, SwapSnapshot};
use async_trait::async_trait;

/// Request to lock funds in a new swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateSwapRequest {
    /// Caller of the transaction; becomes the swap's sender.
    pub sender: Address,
    /// Party allowed to claim with the secret.
    pub receiver: Address,
    /// Digest of the secret.
    pub secret_hash: Hash,
    /// Amount to lock.
    pub amount: u64,
    /// Time to expiry, in hours from now.
    pub ttl_hours: u64,
}

/// Escrow API - inbound port.
#[async_trait]
pub trait EscrowApi: Send + Sync {
    /// Lock `request.amount` out of `funding` into a new published swap.
    async fn create(
        &self,
        request: CreateSwapRequest,
        funding: &mut Balance,
    ) -> Result<SwapId, EscrowError>;

    /// Pay the locked funds to the receiver. Returns the amount paid.
    ///
    /// Anyone holding the secret may call this.
    async fn redeem(&self, swap_id: SwapId, secret: SecureSecret) -> Result<u64, EscrowError>;

    /// Return the locked funds to the sender. Returns the amount paid.
    async fn refund(&self, swap_id: SwapId) -> Result<u64, EscrowError>;

    /// Get swap by ID.
    fn get_swap(&self, swap_id: &SwapId) -> Option<SwapSnapshot>;

    /// Guard: `now >= expiry`.
    fn is_expired(&self, swap_id: &SwapId) -> Result<bool, EscrowError>;

    /// Guard: `locked_funds == 0`.
    fn is_settled(&self, swap_id: &SwapId) -> Result<bool, EscrowError>;
}
