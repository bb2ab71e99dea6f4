//! On-disk shape of the credential store.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use warrant_crypto::KeyPair;
use warrant_delegation::Delegation;

use crate::error::{StoreError, StoreResult};

/// The credential store document.
///
/// Written by the issuing service's login tooling; this program only
/// reads it. The principal is the agent's ed25519 secret key in base64.
#[derive(Debug, Serialize, Deserialize)]
pub struct AgentData {
    /// Base64-encoded ed25519 secret key of the local agent.
    pub principal: String,
    /// Delegations collected for this agent (proof material).
    #[serde(default)]
    pub delegations: Vec<Delegation>,
}

impl AgentData {
    /// Build a document from a key pair and delegations (test fixtures).
    #[must_use]
    pub fn new(keypair: &KeyPair, delegations: Vec<Delegation>) -> Self {
        use base64::Engine;
        let secret = Zeroizing::new(keypair.secret_key_bytes());
        Self {
            principal: base64::engine::general_purpose::STANDARD.encode(secret.as_ref()),
            delegations,
        }
    }

    /// Parse a store document from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] if the bytes are not a valid
    /// document.
    pub fn from_json(bytes: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Malformed(e.to_string()))
    }

    /// Serialize the document to JSON bytes (test fixtures).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| StoreError::Malformed(e.to_string()))
    }

    /// Reconstruct the agent's signing key from the stored principal.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BadPrincipal`] if the principal is not
    /// base64 or not a 32-byte secret key.
    pub fn keypair(&self) -> StoreResult<KeyPair> {
        use base64::Engine;
        let secret = Zeroizing::new(
            base64::engine::general_purpose::STANDARD
                .decode(&self.principal)
                .map_err(|e| StoreError::BadPrincipal(e.to_string()))?,
        );
        KeyPair::from_secret_key(&secret).map_err(|e| StoreError::BadPrincipal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let keypair = KeyPair::generate();
        let data = AgentData::new(&keypair, Vec::new());

        let json = data.to_json().unwrap();
        let back = AgentData::from_json(&json).unwrap();

        assert_eq!(back.principal, data.principal);
        assert!(back.delegations.is_empty());
        assert_eq!(
            back.keypair().unwrap().public_key_bytes(),
            keypair.public_key_bytes()
        );
    }

    #[test]
    fn test_missing_delegations_field_defaults_empty() {
        let keypair = KeyPair::generate();
        let principal = AgentData::new(&keypair, Vec::new()).principal;
        let json = format!("{{\"principal\": \"{principal}\"}}");

        let data = AgentData::from_json(json.as_bytes()).unwrap();
        assert!(data.delegations.is_empty());
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            AgentData::from_json(b"not json"),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_bad_principal() {
        let data = AgentData {
            principal: "!!not-base64!!".into(),
            delegations: Vec::new(),
        };
        assert!(matches!(data.keypair(), Err(StoreError::BadPrincipal(_))));

        let short = AgentData {
            principal: "AAAA".into(), // 3 bytes, not a key
            delegations: Vec::new(),
        };
        assert!(matches!(short.keypair(), Err(StoreError::BadPrincipal(_))));
    }
}
