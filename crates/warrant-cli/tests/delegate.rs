//! End-to-end delegation building against a real on-disk store.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::path::Path;

use warrant_crypto::KeyPair;
use warrant_delegation::{
    Ability, Capability, DelegationBuilder, DelegationError, Did, archive, unix_now,
};
use warrant_store::{AgentData, StoreConf, StoreError};

use warrant_cli::delegate::{DelegateError, create_delegation};

const PROFILE: &str = "warrant-cli";

/// Write a store for `profile` whose agent holds one proof for `can` on
/// the account behind `email`. Returns the agent key.
fn seed_store(dir: &Path, email: &str, can: &str) -> KeyPair {
    let agent_key = KeyPair::generate();
    let account = Did::from_email(email).unwrap();

    let mut proof = DelegationBuilder::new(Did::Key(agent_key.public_key()))
        .capability(Capability::new(Ability::new(can).unwrap(), account.clone()))
        .expiration(unix_now() + 30 * 86_400)
        .issue(&KeyPair::generate());
    // Proofs for account capabilities are rooted in the account itself.
    proof.issuer = account;

    let data = AgentData::new(&agent_key, vec![proof]);
    std::fs::write(
        dir.join(format!("{PROFILE}.json")),
        data.to_json().unwrap(),
    )
    .unwrap();

    agent_key
}

fn target_did() -> (Did, String) {
    let did = Did::Key(KeyPair::generate().public_key());
    let rendered = did.to_string();
    (did, rendered)
}

#[tokio::test]
async fn mints_a_delegation_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let agent_key = seed_store(dir.path(), "alice@example.com", "plan/get");
    let conf = StoreConf::with_root(PROFILE, dir.path());
    let (audience, audience_str) = target_did();

    let before = unix_now();
    let encoded = create_delegation(&conf, "plan/get", &audience_str, "alice@example.com", 365)
        .await
        .unwrap();
    let after = unix_now();

    assert!(!encoded.is_empty());
    assert!(encoded.starts_with('m'));

    // The encoded string decodes back to the delegation we just minted.
    let delegation = archive::from_link_string(&encoded).unwrap();
    assert_eq!(delegation.audience, audience);
    assert_eq!(delegation.issuer, Did::Key(agent_key.public_key()));
    assert!(delegation.verify_signature().is_ok());

    // Expiration is now + 365 days, within test-run tolerance.
    assert!(delegation.expiration >= before + 365 * 86_400);
    assert!(delegation.expiration <= after + 365 * 86_400);

    // The granted capability names the derived account.
    let account = Did::from_email("alice@example.com").unwrap();
    assert_eq!(delegation.capabilities.len(), 1);
    assert_eq!(delegation.capabilities[0].can.as_str(), "plan/get");
    assert_eq!(delegation.capabilities[0].with, account);

    // The matching proof rode along.
    assert_eq!(delegation.proofs.len(), 1);
    assert_eq!(delegation.proofs[0].issuer, account);
}

#[tokio::test]
async fn wildcard_proof_satisfies_a_narrow_request() {
    let dir = tempfile::tempdir().unwrap();
    seed_store(dir.path(), "alice@example.com", "plan/*");
    let conf = StoreConf::with_root(PROFILE, dir.path());
    let (_, audience_str) = target_did();

    let encoded = create_delegation(&conf, "plan/get", &audience_str, "alice@example.com", 30)
        .await
        .unwrap();

    let delegation = archive::from_link_string(&encoded).unwrap();
    assert_eq!(delegation.proofs.len(), 1);
    assert_eq!(delegation.proofs[0].capabilities[0].can.as_str(), "plan/*");
}

#[tokio::test]
async fn custom_expiry_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    seed_store(dir.path(), "alice@example.com", "plan/get");
    let conf = StoreConf::with_root(PROFILE, dir.path());
    let (_, audience_str) = target_did();

    let before = unix_now();
    let encoded = create_delegation(&conf, "plan/get", &audience_str, "alice@example.com", 7)
        .await
        .unwrap();

    let delegation = archive::from_link_string(&encoded).unwrap();
    assert!(delegation.expiration >= before + 7 * 86_400);
    assert!(delegation.expiration <= unix_now() + 7 * 86_400);
}

#[tokio::test]
async fn fails_without_matching_proofs() {
    let dir = tempfile::tempdir().unwrap();
    seed_store(dir.path(), "alice@example.com", "plan/get");
    let conf = StoreConf::with_root(PROFILE, dir.path());
    let (_, audience_str) = target_did();

    // Different capability.
    let err = create_delegation(&conf, "store/add", &audience_str, "alice@example.com", 365)
        .await
        .unwrap_err();
    assert!(matches!(err, DelegateError::NoProofs { .. }));
    let message = err.to_string();
    assert!(message.contains("store/add"));
    assert!(message.contains("did:mailto:example.com:alice"));

    // Different account.
    let err = create_delegation(&conf, "plan/get", &audience_str, "bob@example.com", 365)
        .await
        .unwrap_err();
    assert!(matches!(err, DelegateError::NoProofs { .. }));
}

#[tokio::test]
async fn bad_email_fails_before_the_store_is_read() {
    // The store directory doesn't even exist: a store access would fail
    // with NotFound, so an InvalidEmail error proves derivation ran first.
    let conf = StoreConf::with_root(PROFILE, "/nonexistent/warrant-test");
    let (_, audience_str) = target_did();

    for email in ["@example.com", "alice@"] {
        let err = create_delegation(&conf, "plan/get", &audience_str, email, 365)
            .await
            .unwrap_err();
        assert!(
            matches!(
                err,
                DelegateError::Delegation(DelegationError::InvalidEmail(_))
            ),
            "expected InvalidEmail for {email:?}, got {err:?}"
        );
    }
}

#[tokio::test]
async fn missing_store_propagates_unchanged() {
    let conf = StoreConf::with_root(PROFILE, "/nonexistent/warrant-test");
    let (_, audience_str) = target_did();

    let err = create_delegation(&conf, "plan/get", &audience_str, "alice@example.com", 365)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DelegateError::Store(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn malformed_target_is_a_construction_error() {
    let dir = tempfile::tempdir().unwrap();
    seed_store(dir.path(), "alice@example.com", "plan/get");
    let conf = StoreConf::with_root(PROFILE, dir.path());

    // Passes the CLI's prefix check but fails to parse as a key DID.
    let err = create_delegation(
        &conf,
        "plan/get",
        "did:key:zNotBase58!!",
        "alice@example.com",
        365,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DelegateError::Delegation(DelegationError::InvalidDid(_))
    ));
}
