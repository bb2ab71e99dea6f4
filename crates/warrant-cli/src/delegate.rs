//! Delegation builder - glue between the credential store and the
//! delegation library.

use thiserror::Error;
use tracing::info;

use warrant_delegation::{
    Ability, Capability, DelegationBuilder, DelegationError, Did, archive, unix_now,
};
use warrant_store::{Client, StoreConf, StoreError};

/// Errors surfaced by [`create_delegation`].
///
/// Every variant is terminal; nothing is retried.
#[derive(Debug, Error)]
pub enum DelegateError {
    /// The account has no stored authorization for the capability.
    #[error(
        "no proofs found for {can} on {account}: \
         authenticate this email with the issuing service first"
    )]
    NoProofs {
        /// Requested capability.
        can: String,
        /// Derived account identifier.
        account: String,
    },

    /// Credential store failure, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Derivation, construction, or archive failure from the delegation
    /// library, propagated unchanged.
    #[error(transparent)]
    Delegation(#[from] DelegationError),
}

/// Mint a delegation of `capability` on the account behind `email` to the
/// server agent `target_did`, expiring `expiry_days` from now.
///
/// Returns the delegation as a content-addressed, multibase base64 link
/// string over its binary archive.
///
/// # Errors
///
/// Fails fast on the first problem: malformed email, unreadable store, no
/// matching proofs, unparsable target DID, or archive failure.
pub async fn create_delegation(
    conf: &StoreConf,
    capability: &str,
    target_did: &str,
    email: &str,
    expiry_days: u64,
) -> Result<String, DelegateError> {
    // Account derivation comes first: a malformed email must fail before
    // the store is touched.
    let account = Did::from_email(email)?;
    let requested = Capability::new(Ability::new(capability)?, account.clone());

    let client = Client::load(conf).await?;

    info!(agent = %client.did(), "loaded agent");
    info!(account = %account, capability, "delegating");
    let proofs = client.proofs(&requested);
    info!(count = proofs.len(), "proofs found");

    if proofs.is_empty() {
        return Err(DelegateError::NoProofs {
            can: capability.to_owned(),
            account: account.to_string(),
        });
    }

    let audience: Did = target_did.parse()?;
    let expiration = unix_now().saturating_add(expiry_days.saturating_mul(86_400));

    let delegation = DelegationBuilder::new(audience)
        .capability(requested)
        .proofs(proofs)
        .expiration(expiration)
        .issue(client.keypair());

    Ok(archive::to_link_string(&delegation)?)
}
