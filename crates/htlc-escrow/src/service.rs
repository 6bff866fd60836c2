//! Escrow Service - application layer
//!
//! Wires the domain to the outbound ports and implements [`EscrowApi`].
//! Every settlement is a single [`SwapLedger::update`] call; payout and
//! event emission happen after it commits.

use crate::algorithms::{compute_expiry, validate_ttl};
use crate::config::EscrowConfig;
use crate::domain::{
    Address, Balance, EscrowError, EscrowEvent, SecureSecret, SettlementReceipt, Swap, SwapId,
    SwapParams, SwapSnapshot,
};
use crate::ports::inbound::{CreateSwapRequest, EscrowApi};
use crate::ports::outbound::{AssetVault, Clock, EscrowEventPublisher, SecretHasher, SwapLedger};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outbound dependencies of the escrow service.
#[derive(Clone)]
pub struct EscrowDependencies {
    /// Shared record store
    pub ledger: Arc<dyn SwapLedger>,
    /// Destination accounts for payouts
    pub vault: Arc<dyn AssetVault>,
    /// Source of `now`
    pub clock: Arc<dyn Clock>,
    /// Hashlock function
    pub hasher: Arc<dyn SecretHasher>,
    /// Event sink
    pub publisher: Arc<dyn EscrowEventPublisher>,
}

/// Hashed-timelock escrow engine.
pub struct EscrowService {
    deps: EscrowDependencies,
    config: EscrowConfig,
}

impl EscrowService {
    /// Create a new service.
    pub fn new(deps: EscrowDependencies, config: EscrowConfig) -> Self {
        if deps.hasher.algorithm() != config.hash_algorithm {
            warn!(
                configured = %config.hash_algorithm,
                injected = %deps.hasher.algorithm(),
                "[htlc] Injected hasher overrides configured algorithm"
            );
        }
        Self { deps, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    /// Current clock reading.
    pub fn now_ms(&self) -> u64 {
        self.deps.clock.now_ms()
    }

    fn snapshot_or_not_found(&self, swap_id: &SwapId) -> Result<SwapSnapshot, EscrowError> {
        self.deps
            .ledger
            .get(swap_id)
            .ok_or(EscrowError::SwapNotFound(*swap_id))
    }

    fn log_rejection(op: &'static str, swap_id: &SwapId, err: &EscrowError) {
        debug!(
            op,
            code = err.code(),
            "[htlc] {} rejected for {:02x}{:02x}...: {}",
            op,
            swap_id[0],
            swap_id[1],
            err
        );
    }

    /// Move the payout to `destination` and return the amount moved.
    fn pay_out(&self, receipt: SettlementReceipt, destination: &Address) -> u64 {
        let amount = receipt.payout.value();
        self.deps.vault.transfer(receipt.payout, destination);
        amount
    }
}

#[async_trait]
impl EscrowApi for EscrowService {
    async fn create(
        &self,
        request: CreateSwapRequest,
        funding: &mut Balance,
    ) -> Result<SwapId, EscrowError> {
        validate_ttl(request.ttl_hours, self.config.max_ttl_hours)?;

        let now = self.deps.clock.now_ms();
        let expiry = compute_expiry(now, request.ttl_hours)?;

        let swap = Swap::lock(
            SwapParams {
                id: self.deps.ledger.new_record_id(),
                sender: request.sender,
                receiver: request.receiver,
                amount: request.amount,
                secret_hash: request.secret_hash,
                expiry,
                created_at: now,
            },
            funding,
        )?;
        let swap_id = *swap.id();

        if let Err(rejected) = self.deps.ledger.publish(swap) {
            let rejected = *rejected;
            funding.join(rejected.swap.into_locked_funds());
            Self::log_rejection("create", &swap_id, &rejected.error);
            return Err(rejected.error);
        }

        info!(
            "[htlc] Created swap {:02x}{:02x}... amount={} ttl_hours={} expiry={}",
            swap_id[0], swap_id[1], request.amount, request.ttl_hours, expiry
        );

        self.deps
            .publisher
            .publish(EscrowEvent::Initialized {
                swap_id,
                sender: request.sender,
                receiver: request.receiver,
            })
            .await;

        Ok(swap_id)
    }

    async fn redeem(&self, swap_id: SwapId, secret: SecureSecret) -> Result<u64, EscrowError> {
        let digest = self.deps.hasher.digest(secret.as_bytes());
        let now = self.deps.clock.now_ms();

        let receipt = self
            .deps
            .ledger
            .update(&swap_id, &mut |swap| swap.redeem(&digest, now))
            .map_err(|e| {
                Self::log_rejection("redeem", &swap_id, &e);
                e
            })?;

        let sender = receipt.swap.sender;
        let receiver = receipt.swap.receiver;
        let amount = self.pay_out(receipt, &receiver);

        info!(
            "[htlc] Redeemed swap {:02x}{:02x}... amount={}",
            swap_id[0], swap_id[1], amount
        );

        self.deps
            .publisher
            .publish(EscrowEvent::Redeemed {
                swap_id,
                sender,
                receiver,
                secret: secret.as_bytes().to_vec(),
            })
            .await;

        Ok(amount)
    }

    async fn refund(&self, swap_id: SwapId) -> Result<u64, EscrowError> {
        let now = self.deps.clock.now_ms();

        let receipt = self
            .deps
            .ledger
            .update(&swap_id, &mut |swap| swap.refund(now))
            .map_err(|e| {
                Self::log_rejection("refund", &swap_id, &e);
                e
            })?;

        let sender = receipt.swap.sender;
        let receiver = receipt.swap.receiver;
        let amount = self.pay_out(receipt, &sender);

        info!(
            "[htlc] Refunded swap {:02x}{:02x}... amount={}",
            swap_id[0], swap_id[1], amount
        );

        self.deps
            .publisher
            .publish(EscrowEvent::Refunded {
                swap_id,
                sender,
                receiver,
            })
            .await;

        Ok(amount)
    }

    fn get_swap(&self, swap_id: &SwapId) -> Option<SwapSnapshot> {
        self.deps.ledger.get(swap_id)
    }

    fn is_expired(&self, swap_id: &SwapId) -> Result<bool, EscrowError> {
        let swap = self.snapshot_or_not_found(swap_id)?;
        Ok(swap.is_expired(self.deps.clock.now_ms()))
    }

    fn is_settled(&self, swap_id: &SwapId) -> Result<bool, EscrowError> {
        Ok(self.snapshot_or_not_found(swap_id)?.is_settled())
    }
}
