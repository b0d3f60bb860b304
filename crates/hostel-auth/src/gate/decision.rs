//! Outcome of a gate evaluation.

use std::fmt;

use crate::jwt::Claims;

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No token was presented.
    MissingToken,
    /// The token failed verification.
    InvalidToken,
    /// The token is valid but belongs to another role.
    RoleMismatch,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "missing token"),
            Self::InvalidToken => write!(f, "invalid token"),
            Self::RoleMismatch => write!(f, "role mismatch"),
        }
    }
}

/// Gate verdict for one request.
#[derive(Debug, Clone)]
pub enum GateDecision {
    /// Proceed. Claims are present when a valid token was required.
    Allow(Option<Claims>),
    /// Stop, and send the browser to `redirect_to`.
    Deny {
        /// Why the request was denied.
        reason: DenyReason,
        /// Login page or the caller's own home page.
        redirect_to: String,
    },
}

impl GateDecision {
    /// Returns `true` for [`GateDecision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}
