//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warrant_delegation::prelude::*;` to import the essential types.

// Errors
pub use crate::{DelegationError, DelegationResult};

// Principals and capabilities
pub use crate::{Ability, Capability, Did};

// Delegations and transport
pub use crate::archive::{ARCHIVE_CODE, from_link_string, to_link_string};
pub use crate::{Delegation, DelegationBuilder, Link, unix_now};
