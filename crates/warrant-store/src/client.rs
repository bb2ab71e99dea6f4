//! Read-only client view over a loaded credential store.

use tracing::debug;

use warrant_crypto::KeyPair;
use warrant_delegation::{Capability, Delegation, Did};

use crate::conf::StoreConf;
use crate::data::AgentData;
use crate::error::{StoreError, StoreResult};

/// The local agent, loaded from a credential store.
///
/// Holds the signing key, the derived `did:key` identity, and the stored
/// delegations. Lookup is synchronous over the loaded data; nothing is
/// ever written back.
pub struct Client {
    keypair: KeyPair,
    did: Did,
    delegations: Vec<Delegation>,
}

impl Client {
    /// Load the agent from the store file `conf` resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file does not exist,
    /// [`StoreError::Unreadable`] on I/O failure, and
    /// [`StoreError::Malformed`] / [`StoreError::BadPrincipal`] on a bad
    /// document.
    pub async fn load(conf: &StoreConf) -> StoreResult<Self> {
        let path = conf.path()?;
        if !path.exists() {
            return Err(StoreError::NotFound { path });
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| StoreError::Unreadable {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let data = AgentData::from_json(&bytes)?;
        let client = Self::from_data(data)?;
        debug!(
            path = %path.display(),
            delegations = client.delegations.len(),
            "loaded credential store"
        );
        Ok(client)
    }

    /// Build a client from an in-memory document (fake-store seam for
    /// tests and embedding).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BadPrincipal`] if the stored principal is
    /// unusable.
    pub fn from_data(data: AgentData) -> StoreResult<Self> {
        let keypair = data.keypair()?;
        let did = Did::Key(keypair.public_key());
        Ok(Self {
            keypair,
            did,
            delegations: data.delegations,
        })
    }

    /// The agent's `did:key` identity.
    #[must_use]
    pub fn did(&self) -> &Did {
        &self.did
    }

    /// The agent's signing key.
    #[must_use]
    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Stored delegations matching a requested capability.
    ///
    /// A stored delegation matches when its audience is this agent, it is
    /// unexpired, and one of its capabilities covers the request (same
    /// resource, ability equal or within a wildcard family).
    #[must_use]
    pub fn proofs(&self, requested: &Capability) -> Vec<Delegation> {
        self.delegations
            .iter()
            .filter(|delegation| {
                delegation.audience == self.did
                    && !delegation.is_expired()
                    && delegation
                        .capabilities
                        .iter()
                        .any(|held| held.covers(requested))
            })
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("did", &self.did)
            .field("delegations", &self.delegations.len())
            .finish_non_exhaustive()
    }
}
