use std::fmt;
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Storage value used for records created without an identity
const ANONYMOUS_KEY: &str = "";

/// Resolved identity of the caller, as handed over by the identity source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AppError::unauthorized("Identity cannot be empty"));
        }
        if id.len() > 128 {
            return Err(AppError::unauthorized("Identity is too long"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tenant a record belongs to. Fixed at creation, never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    Tenant(Identity),
    /// Records created while no identity was resolved (optional policy only)
    Anonymous,
}

impl Owner {
    /// Value stored in `owner_id` columns
    pub fn storage_key(&self) -> &str {
        match self {
            Owner::Tenant(identity) => identity.as_str(),
            Owner::Anonymous => ANONYMOUS_KEY,
        }
    }

    /// Rebuild from an `owner_id` column
    pub fn from_storage_key(key: &str) -> Self {
        if key == ANONYMOUS_KEY {
            Owner::Anonymous
        } else {
            Owner::Tenant(Identity(key.to_string()))
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Tenant(identity) => write!(f, "{}", identity),
            Owner::Anonymous => f.write_str("anonymous"),
        }
    }
}

/// How an absent identity is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Every operation requires an identity
    #[default]
    Mandatory,
    /// Absent identity acts as the anonymous owner
    Optional,
}

impl AccessPolicy {
    /// Scope the caller. Runs before any data access.
    pub fn scope(&self, identity: Option<Identity>) -> Result<Owner> {
        match (identity, self) {
            (Some(identity), _) => Ok(Owner::Tenant(identity)),
            (None, AccessPolicy::Optional) => Ok(Owner::Anonymous),
            (None, AccessPolicy::Mandatory) => {
                Err(AppError::unauthorized("Authentication required"))
            }
        }
    }
}

impl FromStr for AccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mandatory" => Ok(AccessPolicy::Mandatory),
            "optional" => Ok(AccessPolicy::Optional),
            _ => Err(format!("Invalid access policy: {}", s)),
        }
    }
}
