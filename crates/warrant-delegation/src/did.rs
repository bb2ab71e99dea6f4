//! Principal identifiers.
//!
//! Two DID methods appear in this system:
//!
//! - `did:key:z...` - a public-key principal. The body is the multibase
//!   base58btc encoding of the ed25519 multicodec tag followed by the
//!   32-byte public key. Agents (both the local issuer and the server
//!   audience) are key principals.
//! - `did:mailto:<domain>:<user>` - an account principal derived from an
//!   email address. Accounts own capabilities; proofs in the credential
//!   store are rooted in them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use warrant_crypto::PublicKey;

use crate::base58;
use crate::error::{DelegationError, DelegationResult};

const KEY_PREFIX: &str = "did:key:";
const MAILTO_PREFIX: &str = "did:mailto:";

/// Multicodec tag for an ed25519 public key.
const ED25519_CODEC: [u8; 2] = [0xed, 0x01];

/// A principal identifier.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Did {
    /// A public-key principal (`did:key:z...`).
    Key(PublicKey),
    /// An account principal (`did:mailto:<domain>:<user>`).
    Mailto {
        /// Domain half of the account email.
        domain: String,
        /// User half of the account email.
        user: String,
    },
}

impl Did {
    /// Derive an account principal from an email address.
    ///
    /// `user@domain` maps to `did:mailto:<domain>:<user>`. The email is
    /// split on the first `@`; both halves must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`DelegationError::InvalidEmail`] otherwise.
    pub fn from_email(email: &str) -> DelegationResult<Self> {
        let (user, domain) = email
            .split_once('@')
            .ok_or_else(|| DelegationError::InvalidEmail(email.to_owned()))?;
        if user.is_empty() || domain.is_empty() {
            return Err(DelegationError::InvalidEmail(email.to_owned()));
        }
        Ok(Self::Mailto {
            domain: domain.to_owned(),
            user: user.to_owned(),
        })
    }

    /// The public key behind a key principal, if this is one.
    #[must_use]
    pub fn as_key(&self) -> Option<&PublicKey> {
        match self {
            Self::Key(pk) => Some(pk),
            Self::Mailto { .. } => None,
        }
    }

    fn parse_key(body: &str) -> DelegationResult<Self> {
        let encoded = body
            .strip_prefix('z')
            .ok_or_else(|| DelegationError::InvalidDid(format!("{KEY_PREFIX}{body}")))?;
        let bytes = base58::decode(encoded)
            .ok_or_else(|| DelegationError::InvalidDid(format!("{KEY_PREFIX}{body}")))?;
        let key = bytes
            .strip_prefix(&ED25519_CODEC[..])
            .ok_or_else(|| DelegationError::InvalidDid(format!("{KEY_PREFIX}{body}")))?;
        let pk = PublicKey::try_from_slice(key)
            .map_err(|_| DelegationError::InvalidDid(format!("{KEY_PREFIX}{body}")))?;
        Ok(Self::Key(pk))
    }

    fn parse_mailto(body: &str) -> DelegationResult<Self> {
        let (domain, user) = body
            .split_once(':')
            .ok_or_else(|| DelegationError::InvalidDid(format!("{MAILTO_PREFIX}{body}")))?;
        if domain.is_empty() || user.is_empty() {
            return Err(DelegationError::InvalidDid(format!("{MAILTO_PREFIX}{body}")));
        }
        Ok(Self::Mailto {
            domain: domain.to_owned(),
            user: user.to_owned(),
        })
    }
}

impl From<PublicKey> for Did {
    fn from(pk: PublicKey) -> Self {
        Self::Key(pk)
    }
}

impl FromStr for Did {
    type Err = DelegationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(body) = s.strip_prefix(KEY_PREFIX) {
            Self::parse_key(body)
        } else if let Some(body) = s.strip_prefix(MAILTO_PREFIX) {
            Self::parse_mailto(body)
        } else {
            Err(DelegationError::InvalidDid(s.to_owned()))
        }
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(pk) => {
                let mut bytes = Vec::with_capacity(34);
                bytes.extend_from_slice(&ED25519_CODEC);
                bytes.extend_from_slice(pk.as_bytes());
                write!(f, "{KEY_PREFIX}z{}", base58::encode(&bytes))
            }
            Self::Mailto { domain, user } => write!(f, "{MAILTO_PREFIX}{domain}:{user}"),
        }
    }
}

impl fmt::Debug for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Did({self})")
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warrant_crypto::KeyPair;

    #[test]
    fn test_email_derivation() {
        let did = Did::from_email("alice@example.com").unwrap();
        assert_eq!(did.to_string(), "did:mailto:example.com:alice");
    }

    #[test]
    fn test_email_split_on_first_at() {
        // Emails may quote an @ in the local part; the split is on the first one.
        let did = Did::from_email("a@b@c").unwrap();
        assert_eq!(did.to_string(), "did:mailto:b@c:a");
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "no-at-sign", "@example.com", "alice@"] {
            assert!(
                matches!(
                    Did::from_email(email),
                    Err(DelegationError::InvalidEmail(_))
                ),
                "expected failure for {email:?}"
            );
        }
    }

    #[test]
    fn test_key_did_roundtrip() {
        let pk = KeyPair::generate().public_key();
        let did = Did::Key(pk);

        let rendered = did.to_string();
        assert!(rendered.starts_with("did:key:z"));

        let parsed: Did = rendered.parse().unwrap();
        assert_eq!(parsed, did);
        assert_eq!(parsed.as_key(), Some(&pk));
    }

    #[test]
    fn test_key_did_has_ed25519_fingerprint() {
        // The 0xed01 multicodec tag makes every ed25519 did:key body start "z6Mk".
        let pk = KeyPair::generate().public_key();
        let rendered = Did::Key(pk).to_string();
        assert!(
            rendered.starts_with("did:key:z6Mk"),
            "unexpected rendering: {rendered}"
        );
    }

    #[test]
    fn test_mailto_did_roundtrip() {
        let did: Did = "did:mailto:example.com:alice".parse().unwrap();
        assert_eq!(
            did,
            Did::Mailto {
                domain: "example.com".into(),
                user: "alice".into()
            }
        );
        assert_eq!(did.to_string(), "did:mailto:example.com:alice");
        assert!(did.as_key().is_none());
    }

    #[test]
    fn test_rejects_malformed_dids() {
        for s in [
            "",
            "did:web:example.com",
            "did:key:abc",          // missing multibase prefix
            "did:key:z0OIl",        // invalid base58 characters
            "did:key:z6",           // too short
            "did:mailto:onlydomain",
            "did:mailto::user",
            "did:mailto:domain:",
        ] {
            assert!(s.parse::<Did>().is_err(), "expected failure for {s:?}");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let did = Did::from_email("bob@example.org").unwrap();
        let json = serde_json::to_string(&did).unwrap();
        assert_eq!(json, "\"did:mailto:example.org:bob\"");
        let back: Did = serde_json::from_str(&json).unwrap();
        assert_eq!(back, did);
    }
}
