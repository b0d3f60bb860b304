//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hostel_core::config::RouteAccess;

/// The three kinds of account on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Books rooms.
    Student,
    /// Lists and manages hostels.
    HostelOwner,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 3] = [Role::Student, Role::HostelOwner, Role::Admin];

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::HostelOwner => "hostel-owner",
            Self::Admin => "admin",
        }
    }

    /// The role a gate access level is reserved for, if any.
    pub fn from_access(access: RouteAccess) -> Option<Self> {
        match access {
            RouteAccess::Student => Some(Self::Student),
            RouteAccess::HostelOwner => Some(Self::HostelOwner),
            RouteAccess::Admin => Some(Self::Admin),
            RouteAccess::Public | RouteAccess::Authenticated => None,
        }
    }

    /// Whether accounts of this role may sign themselves up.
    pub fn can_self_register(&self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = hostel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "hostel-owner" | "hostel_owner" | "owner" => Ok(Self::HostelOwner),
            "admin" => Ok(Self::Admin),
            _ => Err(hostel_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: student, hostel-owner, admin"
            ))),
        }
    }
}
