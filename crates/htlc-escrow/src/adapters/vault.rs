//! In-Memory Asset Vault
//!
//! Implements `AssetVault` over per-address account balances. The vault is
//! also the only minter of `Balance` values.

use crate::domain::{Address, Balance, EscrowError};
use crate::ports::outbound::AssetVault;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use tracing::debug;

/// In-memory ledger of account balances.
pub struct InMemoryVault {
    accounts: RwLock<HashMap<Address, u64>>,
    /// Total ever minted; bounds every sum of balances.
    total_supply: Mutex<u64>,
}

impl InMemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            total_supply: Mutex::new(0),
        }
    }

    /// Mint a fresh balance.
    ///
    /// Returns `None` if total supply would overflow.
    pub fn mint(&self, value: u64) -> Option<Balance> {
        let mut supply = self.total_supply.lock();
        *supply = supply.checked_add(value)?;
        Some(Balance::new(value))
    }

    /// Total ever minted.
    pub fn total_supply(&self) -> u64 {
        *self.total_supply.lock()
    }

    /// Pull `amount` out of `owner`'s account as a spendable balance.
    pub fn withdraw(&self, owner: &Address, amount: u64) -> Result<Balance, EscrowError> {
        let mut accounts = self.accounts.write();
        let available = accounts.get(owner).copied().unwrap_or(0);
        if available < amount {
            return Err(EscrowError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        accounts.insert(*owner, available - amount);
        Ok(Balance::new(amount))
    }
}

impl Default for InMemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetVault for InMemoryVault {
    fn transfer(&self, balance: Balance, destination: &Address) {
        let value = balance.value();
        debug!(
            "[htlc] Transfer {} to {:02x}{:02x}...",
            value, destination[0], destination[1]
        );
        *self.accounts.write().entry(*destination).or_insert(0) += value;
    }

    fn balance_of(&self, owner: &Address) -> u64 {
        self.accounts.read().get(owner).copied().unwrap_or(0)
    }
}
