//! Escrow configuration from environment variables.

use crate::adapters::{Sha256Hasher, Sha3Hasher, DEFAULT_EVENT_CAPACITY};
use crate::domain::HashAlgorithm;
use crate::ports::outbound::SecretHasher;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Variable present but unparseable.
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        reason: String,
    },

    /// Event channel must hold at least one event.
    #[error("event channel capacity must be positive")]
    ZeroCapacity,
}

/// Escrow engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowConfig {
    /// Hashlock function
    pub hash_algorithm: HashAlgorithm,

    /// Broadcast capacity of the event bus
    pub event_channel_capacity: usize,

    /// Largest `ttl_hours` accepted by Create; `None` means uncapped
    pub max_ttl_hours: Option<u64>,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::Sha256,
            event_channel_capacity: DEFAULT_EVENT_CAPACITY,
            max_ttl_hours: None,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl EscrowConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HTLC_HASH_ALGORITHM`: `sha256` or `sha3_256` (default: sha256)
    /// - `HTLC_EVENT_CAPACITY`: event bus capacity (default: 1000)
    /// - `HTLC_MAX_TTL_HOURS`: largest accepted ttl (default: uncapped)
    /// - `HTLC_LOG_LEVEL` or `RUST_LOG`: log level (default: info)
    /// - `HTLC_JSON_LOGS`: enable JSON logs (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("HTLC_HASH_ALGORITHM") {
            config.hash_algorithm = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "HTLC_HASH_ALGORITHM",
                value: raw.clone(),
                reason,
            })?;
        }

        if let Some(raw) = lookup("HTLC_EVENT_CAPACITY") {
            config.event_channel_capacity = parse_number("HTLC_EVENT_CAPACITY", &raw)?;
        }

        if let Some(raw) = lookup("HTLC_MAX_TTL_HOURS") {
            config.max_ttl_hours = Some(parse_number("HTLC_MAX_TTL_HOURS", &raw)?);
        }

        if let Some(level) = lookup("HTLC_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log_level = level;
        }

        if let Some(raw) = lookup("HTLC_JSON_LOGS") {
            config.json_logs = raw.to_lowercase() == "true" || raw == "1";
        }

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Build the configured hasher.
    pub fn hasher(&self) -> Arc<dyn SecretHasher> {
        match self.hash_algorithm {
            HashAlgorithm::Sha256 => Arc::new(Sha256Hasher),
            HashAlgorithm::Sha3_256 => Arc::new(Sha3Hasher),
        }
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
