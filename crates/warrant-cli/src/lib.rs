//! Library surface of the warrant CLI.
//!
//! Exposes the delegation builder so integration tests (and embedders)
//! can drive it against a fake store; the `warrant` binary in `main.rs`
//! is the only intended consumer otherwise.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod delegate;
