//! Capabilities: an ability exercised over a resource.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::did::Did;
use crate::error::{DelegationError, DelegationResult};

/// An ability name, e.g. `plan/get`.
///
/// A trailing `/*` denotes an action family: `plan/*` covers every ability
/// under the `plan/` namespace. The bare `*` covers everything.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ability(String);

impl Ability {
    /// Create an ability.
    ///
    /// # Errors
    ///
    /// Returns [`DelegationError::EmptyAbility`] if the string is empty.
    pub fn new(s: impl Into<String>) -> DelegationResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(DelegationError::EmptyAbility);
        }
        Ok(Self(s))
    }

    /// The ability as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this ability covers `requested`.
    ///
    /// Exact abilities cover only themselves; `ns/*` covers any ability
    /// under `ns/`; `*` covers everything.
    #[must_use]
    pub fn covers(&self, requested: &Ability) -> bool {
        if self.0 == requested.0 || self.0 == "*" {
            return true;
        }
        if let Some(namespace) = self.0.strip_suffix("/*") {
            return requested
                .0
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with('/'));
        }
        false
    }
}

impl<'de> Deserialize<'de> for Ability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ability({})", self.0)
    }
}

/// A capability: an ability over a resource principal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    /// The ability being exercised.
    pub can: Ability,
    /// The resource it is exercised on.
    pub with: Did,
}

impl Capability {
    /// Create a capability.
    #[must_use]
    pub fn new(can: Ability, with: Did) -> Self {
        Self { can, with }
    }

    /// Whether this capability satisfies a request for `other`.
    ///
    /// The resource must match exactly; the ability may match through a
    /// wildcard family.
    #[must_use]
    pub fn covers(&self, other: &Capability) -> bool {
        self.with == other.with && self.can.covers(&other.can)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.can, self.with)
    }
}
