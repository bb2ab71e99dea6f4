//! Warrant Store - the local credential store and the client view over it.
//!
//! The store is a profile-scoped JSON file owned by the issuing service's
//! login tooling; this crate only ever reads it. It holds the local
//! agent's signing principal and the delegations (proofs) that tooling
//! collected for it.
//!
//! - [`StoreConf`] resolves a profile name to the on-disk file
//! - [`AgentData`] is the file's document shape
//! - [`Client`] is the loaded, read-only view: agent identity, proof
//!   lookup, and the signing key
//!
//! # Example
//!
//! ```no_run
//! use warrant_store::{Client, StoreConf};
//!
//! # async fn run() -> Result<(), warrant_store::StoreError> {
//! let client = Client::load(&StoreConf::default_profile()).await?;
//! println!("agent: {}", client.did());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod client;
mod conf;
mod data;
mod error;

pub use client::Client;
pub use conf::{DEFAULT_PROFILE, StoreConf};
pub use data::AgentData;
pub use error::{StoreError, StoreResult};
