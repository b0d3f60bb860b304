//! Per-request access decisions.

use tracing::debug;

use hostel_core::config::{GateConfig, RoleRoutes, RouteAccess};
use hostel_core::error::AppError;
use hostel_entity::account::Role;

use crate::jwt::{Claims, JwtDecoder};

use super::decision::{DenyReason, GateDecision};
use super::table::{RouteTable, covers};

/// Classifies request paths and checks the carried token against them.
#[derive(Debug, Clone)]
pub struct RouteGate {
    table: RouteTable,
    decoder: JwtDecoder,
    api_prefix: String,
    login_path: String,
    student: RoleRoutes,
    hostel_owner: RoleRoutes,
    admin: RoleRoutes,
}

impl RouteGate {
    /// Builds the gate. Fails if the route table is malformed.
    pub fn new(config: &GateConfig, decoder: JwtDecoder) -> Result<Self, AppError> {
        Ok(Self {
            table: RouteTable::new(&config.rules)?,
            decoder,
            api_prefix: config.api_prefix.trim_end_matches('/').to_string(),
            login_path: config.login_path.clone(),
            student: config.student.clone(),
            hostel_owner: config.hostel_owner.clone(),
            admin: config.admin.clone(),
        })
    }

    /// The underlying route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The token verifier shared with the rest of the HTTP layer.
    pub fn decoder(&self) -> &JwtDecoder {
        &self.decoder
    }

    /// Whether `path` is an API call rather than a browser navigation.
    pub fn is_api(&self, path: &str) -> bool {
        covers(&self.api_prefix, path)
    }

    /// Login and home pages for a role.
    pub fn routes_for(&self, role: Role) -> &RoleRoutes {
        match role {
            Role::Student => &self.student,
            Role::HostelOwner => &self.hostel_owner,
            Role::Admin => &self.admin,
        }
    }

    /// Where an unauthenticated caller is sent for a path of this access level.
    pub fn login_for(&self, access: RouteAccess) -> &str {
        match Role::from_access(access) {
            Some(role) => &self.routes_for(role).login,
            None => &self.login_path,
        }
    }

    /// Evaluates one request.
    pub fn evaluate(&self, path: &str, token: Option<&str>) -> GateDecision {
        let access = self.table.classify(path);
        if access == RouteAccess::Public {
            return GateDecision::Allow(None);
        }

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return self.deny_unauthenticated(path, access, DenyReason::MissingToken);
        };

        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(_) => return self.deny_unauthenticated(path, access, DenyReason::InvalidToken),
        };

        self.authorize(path, access, claims)
    }

    fn authorize(&self, path: &str, access: RouteAccess, claims: Claims) -> GateDecision {
        match Role::from_access(access) {
            Some(required) if required != claims.role => {
                debug!(
                    path,
                    required = %required,
                    actual = %claims.role,
                    account_id = %claims.sub,
                    "Gate denied: role mismatch"
                );
                GateDecision::Deny {
                    reason: DenyReason::RoleMismatch,
                    redirect_to: self.routes_for(claims.role).home.clone(),
                }
            }
            _ => GateDecision::Allow(Some(claims)),
        }
    }

    fn deny_unauthenticated(
        &self,
        path: &str,
        access: RouteAccess,
        reason: DenyReason,
    ) -> GateDecision {
        debug!(path, access = %access, reason = %reason, "Gate denied");
        GateDecision::Deny {
            reason,
            redirect_to: self.login_for(access).to_string(),
        }
    }
}
