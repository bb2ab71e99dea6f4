//! Delegation error types.

use thiserror::Error;

/// Errors that can occur while building, encoding, or parsing delegations.
#[derive(Debug, Error)]
pub enum DelegationError {
    /// Ability string was empty.
    #[error("ability must be a non-empty string")]
    EmptyAbility,

    /// Malformed principal identifier.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// Malformed email address for account derivation.
    #[error("invalid email format: {0}")]
    InvalidEmail(String),

    /// Signature does not match the delegation payload.
    #[error("invalid delegation signature")]
    InvalidSignature,

    /// Delegation expiration is in the past.
    #[error("delegation expired at {0} (unix seconds)")]
    Expired(u64),

    /// Issuer is not a key principal, so its signature cannot be checked locally.
    #[error("issuer {0} has no verifiable public key")]
    UnverifiableIssuer(String),

    /// Archive serialization or deserialization failed.
    #[error("failed to archive delegation: {0}")]
    Archive(String),

    /// Malformed content-addressed link.
    #[error("invalid link: {0}")]
    InvalidLink(String),
}

/// Result type for delegation operations.
pub type DelegationResult<T> = Result<T, DelegationError>;
