//! # Domain Events
//!
//! Notifications for off-chain indexers and watchers. Not required for the
//! engine's correctness; `Redeemed` is how a counter-party watching a linked
//! escrow learns the secret.

use super::errors::{Address, SwapId};
use serde::{Deserialize, Serialize};

/// Topics for escrow events.
pub mod topics {
    /// Swap created and funds locked.
    pub const INITIALIZED: &str = "escrow.initialized";
    /// Secret revealed, funds paid to receiver.
    pub const REDEEMED: &str = "escrow.redeemed";
    /// Deadline passed, funds returned to sender.
    pub const REFUNDED: &str = "escrow.refunded";
}

/// Escrow lifecycle events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EscrowEvent {
    /// A swap record was published.
    Initialized {
        /// Record identifier
        swap_id: SwapId,
        /// Funder
        sender: Address,
        /// Payout destination on redeem
        receiver: Address,
    },
    /// A swap was redeemed with its secret.
    Redeemed {
        /// Record identifier
        swap_id: SwapId,
        /// Funder
        sender: Address,
        /// Party that was paid
        receiver: Address,
        /// Revealed preimage
        secret: Vec<u8>,
    },
    /// A swap was refunded after expiry.
    Refunded {
        /// Record identifier
        swap_id: SwapId,
        /// Party that was paid back
        sender: Address,
        /// Receiver that never claimed
        receiver: Address,
    },
}

impl EscrowEvent {
    /// Record this event refers to.
    pub fn swap_id(&self) -> &SwapId {
        match self {
            Self::Initialized { swap_id, .. }
            | Self::Redeemed { swap_id, .. }
            | Self::Refunded { swap_id, .. } => swap_id,
        }
    }

    /// Topic string for routing.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => topics::INITIALIZED,
            Self::Redeemed { .. } => topics::REDEEMED,
            Self::Refunded { .. } => topics::REFUNDED,
        }
    }
}
