//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Stored and serialized as the literal strings `"User"` and
/// `"Administrator"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum UserRole {
    /// Regular user: may read the tree and create nodes.
    User,
    /// Administrator: may additionally update and delete nodes and
    /// register other administrators.
    Administrator,
}

impl UserRole {
    /// Check if this role is an administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Return the role as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Administrator => "Administrator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = arbor_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "administrator" => Ok(Self::Administrator),
            _ => Err(arbor_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: User, Administrator"
            ))),
        }
    }
}
