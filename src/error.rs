//! Error types for Arbiter Core.
//!
//! Only two failure modes are allowed to escape the moderation pipeline:
//! the policy catalog being unavailable and a persistence failure. AI and
//! parsing faults are absorbed into fallback verdicts instead.

use thiserror::Error;

/// Unified error type for Arbiter Core operations.
#[derive(Debug, Error)]
pub enum ArbiterError {
    /// The policy catalog could not be read. Fatal to the request: a
    /// moderation decision cannot be made without a policy set.
    #[error("Policy catalog unavailable: {0}")]
    PolicyFetch(String),

    /// The computed result could not be persisted. The result itself may
    /// still be usable, but durability failure must be visible.
    #[error("Failed to persist moderation result: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Arbiter operations.
pub type ArbiterResult<T> = Result<T, ArbiterError>;
