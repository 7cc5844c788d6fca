//! Marketplace role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role attached to a profile. Closed set; authorization pattern-matches on it.
///
/// Wire and storage format: the variant name (`"Freelancer"`, `"Client"`, `"Admin"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Freelancer,
    #[default]
    Client,
    Admin,
}

/// Returned by [`Role::from_str`] for anything outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Freelancer, Role::Client, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Freelancer => "Freelancer",
            Self::Client => "Client",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Freelancer" => Ok(Self::Freelancer),
            "Client" => Ok(Self::Client),
            "Admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
