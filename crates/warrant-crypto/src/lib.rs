//! Warrant Crypto - Ed25519 primitives for delegation signing.
//!
//! This crate provides:
//! - Ed25519 key pairs with secure memory handling
//! - Public keys and signatures with stable text encodings
//!
//! Delegations are authorized by detached ed25519 signatures over a
//! canonical payload; this crate owns the key material and nothing else.
//! Principal identifiers (DIDs) and payload layout live in
//! `warrant-delegation`.
//!
//! # Example
//!
//! ```
//! use warrant_crypto::KeyPair;
//!
//! let keypair = KeyPair::generate();
//! let signature = keypair.sign(b"delegation payload");
//! assert!(keypair.verify(b"delegation payload", &signature).is_ok());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod keypair;
mod signature;

pub use error::{CryptoError, CryptoResult};
pub use keypair::{KeyPair, PublicKey};
pub use signature::Signature;
