//! Warrant Delegation - signed, time-bounded capability delegations.
//!
//! This crate provides:
//! - Principal identifiers ([`Did`]): key principals and mailto accounts
//! - Capabilities ([`Capability`]): an ability over a resource, with
//!   `ns/*` family wildcards
//! - [`Delegation`]: a signed statement that an audience may exercise a
//!   set of capabilities until an expiration, backed by proof delegations
//! - A binary archive container and content-addressed [`Link`] rendering
//!   for transporting a delegation as a single base64 string
//!
//! # Security Model
//!
//! A delegation is signed by its issuer's ed25519 key over a versioned,
//! length-prefixed payload covering every field except the signature.
//! Embedded proofs are bound through their own signatures. Delegations
//! issued by account principals (`did:mailto`) cannot be verified locally;
//! they are carried as opaque proof material for the issuing service.
//!
//! # Example
//!
//! ```
//! use warrant_crypto::KeyPair;
//! use warrant_delegation::{Ability, Capability, Did, DelegationBuilder, unix_now};
//!
//! let agent_key = KeyPair::generate();
//! let account = Did::from_email("alice@example.com").unwrap();
//! let audience = Did::Key(KeyPair::generate().public_key());
//!
//! let delegation = DelegationBuilder::new(audience)
//!     .capability(Capability::new(Ability::new("plan/get").unwrap(), account))
//!     .expiration(unix_now() + 3600)
//!     .issue(&agent_key);
//!
//! assert!(delegation.verify_signature().is_ok());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod archive;
pub mod prelude;

mod base58;
mod capability;
mod delegation;
mod did;
mod error;
mod link;

pub use capability::{Ability, Capability};
pub use delegation::{Delegation, DelegationBuilder, unix_now};
pub use did::Did;
pub use error::{DelegationError, DelegationResult};
pub use link::Link;
