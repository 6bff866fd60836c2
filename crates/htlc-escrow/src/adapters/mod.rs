//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-process implementations of the outbound ports: record store, asset
//! vault, clocks, hashers and the event bus.

mod clock;
mod event_bus;
mod hasher;
mod ledger;
mod vault;

pub use clock::{ManualClock, SystemClock};
pub use event_bus::{InMemoryEventBus, NoOpPublisher, DEFAULT_EVENT_CAPACITY};
pub use hasher::{Sha256Hasher, Sha3Hasher};
pub use ledger::InMemorySwapLedger;
pub use vault::InMemoryVault;
