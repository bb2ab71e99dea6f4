//! Delegations - cryptographically signed authorization.
//!
//! A delegation is a signed statement that an audience principal may
//! exercise a set of capabilities until an expiration time, backed by
//! proof delegations that root the authority in an account.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use warrant_crypto::{KeyPair, Signature};

use crate::capability::Capability;
use crate::did::Did;
use crate::error::{DelegationError, DelegationResult};

/// Version of the signing payload format.
/// Increment this when the payload structure changes.
const SIGNING_PAYLOAD_VERSION: u8 = 0x01;

/// Default clock skew tolerance in seconds.
const DEFAULT_CLOCK_SKEW_SECS: u64 = 30;

/// Current Unix time in seconds.
#[must_use]
pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Write a length-prefixed byte slice to the output buffer.
///
/// Format: 4-byte little-endian length followed by the data.
#[allow(clippy::cast_possible_truncation)]
fn write_length_prefixed(payload: &mut Vec<u8>, bytes: &[u8]) {
    // Delegation fields are short strings; u32 lengths suffice.
    payload.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    payload.extend_from_slice(bytes);
}

/// A signed, time-bounded capability delegation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// Principal that issued (and signed) this delegation.
    pub issuer: Did,
    /// Principal the capabilities are delegated to.
    pub audience: Did,
    /// Capabilities granted.
    pub capabilities: Vec<Capability>,
    /// Absolute expiration, Unix seconds.
    pub expiration: u64,
    /// Proof delegations backing the issuer's authority.
    #[serde(default)]
    pub proofs: Vec<Delegation>,
    /// Signature by the issuer over the signing payload.
    pub signature: Signature,
}

impl Delegation {
    /// The payload covered by the signature (everything but the signature).
    ///
    /// Format (v1):
    /// - 1 byte: version (0x01)
    /// - Length-prefixed issuer DID string
    /// - Length-prefixed audience DID string
    /// - 4 bytes: number of capabilities
    /// - For each capability: length-prefixed ability, length-prefixed resource DID
    /// - 8 bytes: expiration (u64 LE)
    /// - 4 bytes: number of proofs
    /// - For each proof: its 64-byte signature
    ///
    /// Proofs are bound through their signatures, which in turn cover
    /// their own payloads.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(512);

        payload.push(SIGNING_PAYLOAD_VERSION);

        write_length_prefixed(&mut payload, self.issuer.to_string().as_bytes());
        write_length_prefixed(&mut payload, self.audience.to_string().as_bytes());

        payload.extend_from_slice(&(self.capabilities.len() as u32).to_le_bytes());
        for capability in &self.capabilities {
            write_length_prefixed(&mut payload, capability.can.as_str().as_bytes());
            write_length_prefixed(&mut payload, capability.with.to_string().as_bytes());
        }

        payload.extend_from_slice(&self.expiration.to_le_bytes());

        payload.extend_from_slice(&(self.proofs.len() as u32).to_le_bytes());
        for proof in &self.proofs {
            payload.extend_from_slice(proof.signature.as_bytes());
        }

        payload
    }

    /// Verify the issuer's signature.
    ///
    /// # Errors
    ///
    /// Returns [`DelegationError::UnverifiableIssuer`] if the issuer is not
    /// a key principal, or [`DelegationError::InvalidSignature`] if the
    /// signature does not match.
    pub fn verify_signature(&self) -> DelegationResult<()> {
        let Some(public_key) = self.issuer.as_key() else {
            return Err(DelegationError::UnverifiableIssuer(self.issuer.to_string()));
        };
        public_key
            .verify(&self.signing_payload(), &self.signature)
            .map_err(|_| DelegationError::InvalidSignature)
    }

    /// Check whether the delegation has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_with_skew(0)
    }

    /// Check expiry with a clock skew tolerance in seconds.
    ///
    /// A delegation that expired up to `skew_secs` ago is still considered
    /// valid.
    #[must_use]
    pub fn is_expired_with_skew(&self, skew_secs: u64) -> bool {
        unix_now() > self.expiration.saturating_add(skew_secs)
    }

    /// Validate the delegation (unexpired, signature OK).
    ///
    /// Uses the default clock skew tolerance (30 seconds).
    ///
    /// # Errors
    ///
    /// Returns [`DelegationError::Expired`] if expired, or
    /// [`DelegationError::InvalidSignature`] /
    /// [`DelegationError::UnverifiableIssuer`] on signature problems.
    pub fn validate(&self) -> DelegationResult<()> {
        if self.is_expired_with_skew(DEFAULT_CLOCK_SKEW_SECS) {
            return Err(DelegationError::Expired(self.expiration));
        }
        self.verify_signature()
    }
}

/// Builder for delegations with a fluent API.
pub struct DelegationBuilder {
    audience: Did,
    capabilities: Vec<Capability>,
    proofs: Vec<Delegation>,
    expiration: u64,
}

impl DelegationBuilder {
    /// Start a delegation to `audience`.
    #[must_use]
    pub fn new(audience: Did) -> Self {
        Self {
            audience,
            capabilities: Vec::new(),
            proofs: Vec::new(),
            expiration: 0,
        }
    }

    /// Grant a capability.
    #[must_use]
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Attach a proof delegation.
    #[must_use]
    pub fn proof(mut self, proof: Delegation) -> Self {
        self.proofs.push(proof);
        self
    }

    /// Attach multiple proof delegations.
    #[must_use]
    pub fn proofs(mut self, proofs: impl IntoIterator<Item = Delegation>) -> Self {
        self.proofs.extend(proofs);
        self
    }

    /// Set the absolute expiration (Unix seconds).
    #[must_use]
    pub fn expiration(mut self, unix_secs: u64) -> Self {
        self.expiration = unix_secs;
        self
    }

    /// Sign and produce the delegation. The issuer is the key principal
    /// of `issuer_key`.
    #[must_use]
    pub fn issue(self, issuer_key: &KeyPair) -> Delegation {
        let mut delegation = Delegation {
            issuer: Did::Key(issuer_key.public_key()),
            audience: self.audience,
            capabilities: self.capabilities,
            expiration: self.expiration,
            proofs: self.proofs,
            signature: Signature::from_bytes([0u8; 64]), // Placeholder
        };

        let payload = delegation.signing_payload();
        delegation.signature = issuer_key.sign(&payload);

        delegation
    }
}
