//! # Escrow Flows
//!
//! Create, redeem and refund end to end, including the failure paths that
//! must leave the record untouched.

#[cfg(test)]
mod tests {
    use crate::fixtures::{EscrowFixture, GENESIS_MS, RECEIVER, SENDER};
    use htlc_escrow::{
        AssetVault, EscrowApi, EscrowConfig, EscrowError, EscrowEvent, HashAlgorithm,
        SecureSecret, SettlementKind, MS_PER_HOUR,
    };

    // =============================================================================
    // CREATE
    // =============================================================================

    #[tokio::test]
    async fn test_create_splits_funding() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(150);

        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        assert_eq!(funding.value(), 50);
        let swap = fx.service.get_swap(&id).unwrap();
        assert_eq!(swap.locked_funds, 100);
        assert_eq!(swap.amount, 100);
        assert_eq!(swap.sender, SENDER);
        assert_eq!(swap.receiver, RECEIVER);
        assert_eq!(swap.secret_hash, fx.hash_lock());
        assert_eq!(swap.expiry, GENESIS_MS + MS_PER_HOUR);
        assert!(swap.settlement.is_none());
    }

    #[tokio::test]
    async fn test_create_month_long_swap() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);

        let id = fx.create(&mut funding, 100, 24 * 31).await.unwrap();

        let swap = fx.service.get_swap(&id).unwrap();
        assert_eq!(swap.expiry, GENESIS_MS + 24 * 31 * MS_PER_HOUR);
        fx.clock.advance(24 * 30 * MS_PER_HOUR);
        assert!(!fx.service.is_expired(&id).unwrap());
        assert_eq!(fx.service.redeem(id, fx.secret.clone()).await, Ok(100));
    }

    #[tokio::test]
    async fn test_create_ids_are_distinct() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(20);

        let a = fx.create(&mut funding, 10, 1).await.unwrap();
        let b = fx.create(&mut funding, 10, 1).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(funding.value(), 0);
    }

    // =============================================================================
    // REFUND
    // =============================================================================

    #[tokio::test]
    async fn test_refund_after_expiry() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 0).await.unwrap();
        let before = fx.vault.balance_of(&SENDER);

        fx.clock.advance(100);
        let refunded = fx.service.refund(id).await.unwrap();

        assert_eq!(refunded, 100);
        assert_eq!(fx.vault.balance_of(&SENDER), before + 100);
        assert_eq!(fx.service.get_swap(&id).unwrap().locked_funds, 0);
        assert!(fx.service.is_settled(&id).unwrap());
    }

    #[tokio::test]
    async fn test_refund_before_expiry_fails() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        assert_eq!(fx.service.refund(id).await, Err(EscrowError::SwapNotExpired));
        assert_eq!(fx.service.get_swap(&id).unwrap().locked_funds, 100);
        assert_eq!(fx.vault.balance_of(&SENDER), 0);
    }

    #[tokio::test]
    async fn test_refund_at_exact_expiry() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        fx.clock.advance(MS_PER_HOUR - 1);
        assert_eq!(fx.service.refund(id).await, Err(EscrowError::SwapNotExpired));

        fx.clock.advance(1);
        assert_eq!(fx.service.refund(id).await, Ok(100));
    }

    // =============================================================================
    // REDEEM
    // =============================================================================

    #[tokio::test]
    async fn test_redeem_immediately_after_create() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();
        let before = fx.vault.balance_of(&RECEIVER);

        let paid = fx.service.redeem(id, fx.secret.clone()).await.unwrap();

        assert_eq!(paid, 100);
        assert_eq!(fx.vault.balance_of(&RECEIVER), before + 100);
        assert!(fx.service.is_settled(&id).unwrap());
    }

    /// With ttl 0 the swap expires at creation, so even an immediate redeem
    /// falls in the refund window. The strict `now < expiry` rule wins over
    /// "redeem right after create" here; that path is covered with ttl 1.
    #[tokio::test]
    async fn test_zero_ttl_redeem_window_is_closed() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 0).await.unwrap();

        // expiry == now: the instant already belongs to the refund window.
        assert!(fx.service.is_expired(&id).unwrap());
        assert_eq!(
            fx.service.redeem(id, fx.secret.clone()).await,
            Err(EscrowError::SwapExpired)
        );
        assert_eq!(fx.vault.balance_of(&RECEIVER), 0);
        assert_eq!(fx.service.refund(id).await, Ok(100));
    }

    #[tokio::test]
    async fn test_redeem_within_window() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();
        let before = fx.vault.balance_of(&RECEIVER);

        fx.clock.advance(MS_PER_HOUR - 1);
        let paid = fx.service.redeem(id, fx.secret.clone()).await.unwrap();

        assert_eq!(paid, 100);
        assert_eq!(fx.vault.balance_of(&RECEIVER), before + 100);
        let settlement = fx.service.get_swap(&id).unwrap().settlement.unwrap();
        assert_eq!(settlement.kind, SettlementKind::Redeemed);
        assert_eq!(settlement.settled_at, GENESIS_MS + MS_PER_HOUR - 1);
    }

    #[tokio::test]
    async fn test_redeem_after_expiry_fails() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 0).await.unwrap();

        fx.clock.advance(100);
        assert_eq!(
            fx.service.redeem(id, fx.secret.clone()).await,
            Err(EscrowError::SwapExpired)
        );
        assert_eq!(fx.service.get_swap(&id).unwrap().locked_funds, 100);
    }

    #[tokio::test]
    async fn test_expired_checked_before_secret() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 0).await.unwrap();

        fx.clock.advance(1);
        assert_eq!(
            fx.service.redeem(id, SecureSecret::from("wrong")).await,
            Err(EscrowError::SwapExpired)
        );
    }

    #[tokio::test]
    async fn test_redeem_is_bearer() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        // Whoever submits the secret, the payout goes to the fixed receiver.
        let observed = SecureSecret::from_slice(fx.secret.as_bytes());
        fx.service.redeem(id, observed).await.unwrap();

        assert_eq!(fx.vault.balance_of(&RECEIVER), 100);
        assert_eq!(fx.vault.balance_of(&SENDER), 0);
    }

    #[tokio::test]
    async fn test_redeem_with_sha3() {
        let fx = EscrowFixture::with_config(EscrowConfig {
            hash_algorithm: HashAlgorithm::Sha3_256,
            ..EscrowConfig::default()
        });
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        assert_eq!(fx.service.redeem(id, fx.secret.clone()).await, Ok(100));
    }

    // =============================================================================
    // DOUBLE SETTLEMENT
    // =============================================================================

    #[tokio::test]
    async fn test_refund_after_redeem_fails() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        fx.service.redeem(id, fx.secret.clone()).await.unwrap();
        fx.clock.advance(MS_PER_HOUR + 1);

        assert_eq!(fx.service.refund(id).await, Err(EscrowError::AlreadySettled));
        assert_eq!(fx.vault.balance_of(&SENDER), 0);
        assert_eq!(fx.vault.balance_of(&RECEIVER), 100);
    }

    #[tokio::test]
    async fn test_second_redeem_fails() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        fx.service.redeem(id, fx.secret.clone()).await.unwrap();
        assert_eq!(
            fx.service.redeem(id, fx.secret.clone()).await,
            Err(EscrowError::AlreadySettled)
        );
        assert_eq!(fx.vault.balance_of(&RECEIVER), 100);
    }

    #[tokio::test]
    async fn test_second_refund_fails() {
        let fx = EscrowFixture::new();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 0).await.unwrap();

        fx.service.refund(id).await.unwrap();
        assert_eq!(fx.service.refund(id).await, Err(EscrowError::AlreadySettled));
        assert_eq!(fx.vault.balance_of(&SENDER), 100);
    }

    // =============================================================================
    // EVENTS
    // =============================================================================

    #[tokio::test]
    async fn test_redeem_reveals_secret_to_watchers() {
        let fx = EscrowFixture::new();
        let mut watcher = fx.bus.subscribe();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 1).await.unwrap();

        fx.service.redeem(id, fx.secret.clone()).await.unwrap();

        assert_eq!(
            watcher.recv().await.unwrap(),
            EscrowEvent::Initialized {
                swap_id: id,
                sender: SENDER,
                receiver: RECEIVER
            }
        );
        match watcher.recv().await.unwrap() {
            EscrowEvent::Redeemed { swap_id, secret, .. } => {
                assert_eq!(swap_id, id);
                let revealed = SecureSecret::new(secret);
                assert!(htlc_escrow::verify_secret(
                    fx.hasher.as_ref(),
                    &revealed,
                    &fx.hash_lock()
                ));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refund_event_reaches_watchers() {
        let fx = EscrowFixture::new();
        let mut watcher = fx.bus.subscribe();
        let mut funding = fx.fund(100);
        let id = fx.create(&mut funding, 100, 0).await.unwrap();
        fx.service.refund(id).await.unwrap();

        let _ = watcher.recv().await.unwrap();
        let refunded = watcher.recv().await.unwrap();
        assert_eq!(refunded.topic(), "escrow.refunded");
        assert_eq!(refunded.swap_id(), &id);
    }
}
