//! # HTLC Escrow
//!
//! Hashed-timelock escrow: funds locked under a hash of a secret, released
//! to the receiver by whoever reveals the secret before the deadline, or
//! returned to the sender once the deadline has passed.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Lifecycle
//!
//! ```text
//! Active --redeem[secret valid, now < expiry]--> Settled (receiver paid)
//! Active --refund[now >= expiry]---------------> Settled (sender paid)
//! ```
//!
//! A record is settled exactly when its locked balance is zero. Records are
//! never removed; a settled record stays in the ledger as an audit trail.
//!
//! ## Guarantees
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | All-or-nothing | `locked_funds` is either `amount` or zero |
//! | Mutual exclusion | settlement is one atomic ledger update |
//! | Complementary windows | redeem iff `now < expiry`, refund iff `now >= expiry` |
//! | Hash binding | full 32-byte digest comparison |
//!
//! ## Module Structure
//!
//! ```text
//! htlc-escrow/
//! ├── domain/          # Swap, Balance, events, errors, invariants
//! ├── algorithms/      # Secret generation, timelock arithmetic
//! ├── ports/           # EscrowApi, SwapLedger, AssetVault, Clock, ...
//! ├── adapters/        # In-memory ledger and vault, clocks, hashers, event bus
//! ├── service          # EscrowService (EscrowApi implementation)
//! ├── config           # EscrowConfig
//! └── telemetry        # tracing-subscriber setup
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod telemetry;

// Re-exports
pub use adapters::{
    InMemoryEventBus, InMemorySwapLedger, InMemoryVault, ManualClock, NoOpPublisher,
    Sha256Hasher, Sha3Hasher, SystemClock,
};
pub use algorithms::{
    compute_expiry, create_hash_lock, generate_random_secret, validate_ttl, verify_secret,
    MS_PER_HOUR, SECRET_LEN,
};
pub use config::{ConfigError, EscrowConfig};
pub use domain::{
    Address, Balance, EscrowError, EscrowEvent, Hash, HashAlgorithm, SecureSecret, Settlement,
    SettlementKind, Swap, SwapId, SwapSnapshot, SwapState,
};
pub use ports::{
    AssetVault, Clock, CreateSwapRequest, EscrowApi, EscrowEventPublisher, SecretHasher,
    SwapLedger,
};
pub use service::{EscrowDependencies, EscrowService};
pub use telemetry::{init_tracing, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
