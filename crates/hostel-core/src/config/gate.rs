//! Route gate configuration: path rules and per-role landing pages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access level a path prefix requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAccess {
    /// No token required.
    Public,
    /// Any valid token, regardless of role.
    Authenticated,
    /// Valid token with the `student` role.
    Student,
    /// Valid token with the `hostel-owner` role.
    HostelOwner,
    /// Valid token with the `admin` role.
    Admin,
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Authenticated => "authenticated",
            Self::Student => "student",
            Self::HostelOwner => "hostel-owner",
            Self::Admin => "admin",
        };
        f.write_str(s)
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Path prefix, matched on segment boundaries.
    pub prefix: String,
    /// Access level required below this prefix.
    pub access: RouteAccess,
}

impl RouteRule {
    /// Convenience constructor.
    pub fn new(prefix: impl Into<String>, access: RouteAccess) -> Self {
        Self {
            prefix: prefix.into(),
            access,
        }
    }
}

/// Sign-in and landing pages for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRoutes {
    /// Where unauthenticated browser navigations are redirected.
    pub login: String,
    /// Where a signed-in user of this role lands.
    pub home: String,
}

/// Route gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Paths under this prefix are API calls and get JSON errors instead of redirects.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Login page used when a path does not belong to a single role.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Student pages.
    #[serde(default = "default_student_routes")]
    pub student: RoleRoutes,
    /// Hostel owner pages.
    #[serde(default = "default_owner_routes")]
    pub hostel_owner: RoleRoutes,
    /// Admin pages.
    #[serde(default = "default_admin_routes")]
    pub admin: RoleRoutes,
    /// Route table. Order is irrelevant; the longest matching prefix wins.
    #[serde(default = "default_rules")]
    pub rules: Vec<RouteRule>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_prefix: default_api_prefix(),
            login_path: default_login_path(),
            student: default_student_routes(),
            hostel_owner: default_owner_routes(),
            admin: default_admin_routes(),
            rules: default_rules(),
        }
    }
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_student_routes() -> RoleRoutes {
    RoleRoutes {
        login: "/student/login".to_string(),
        home: "/student/dashboard".to_string(),
    }
}

fn default_owner_routes() -> RoleRoutes {
    RoleRoutes {
        login: "/owner/login".to_string(),
        home: "/owner/dashboard".to_string(),
    }
}

fn default_admin_routes() -> RoleRoutes {
    RoleRoutes {
        login: "/admin/login".to_string(),
        home: "/admin/dashboard".to_string(),
    }
}

fn default_rules() -> Vec<RouteRule> {
    use RouteAccess::*;

    vec![
        // Public pages and assets
        RouteRule::new("/login", Public),
        RouteRule::new("/register", Public),
        RouteRule::new("/hostels", Public),
        RouteRule::new("/static", Public),
        RouteRule::new("/uploads", Public),
        RouteRule::new("/student/login", Public),
        RouteRule::new("/student/register", Public),
        RouteRule::new("/owner/login", Public),
        RouteRule::new("/owner/register", Public),
        RouteRule::new("/admin/login", Public),
        // Public API
        RouteRule::new("/api/health", Public),
        RouteRule::new("/api/auth/login", Public),
        RouteRule::new("/api/auth/logout", Public),
        RouteRule::new("/api/auth/register", Public),
        RouteRule::new("/api/hostels", Public),
        // Any signed-in account
        RouteRule::new("/api/auth/me", Authenticated),
        RouteRule::new("/api/account", Authenticated),
        // Role areas
        RouteRule::new("/student", Student),
        RouteRule::new("/api/student", Student),
        RouteRule::new("/owner", HostelOwner),
        RouteRule::new("/api/owner", HostelOwner),
        RouteRule::new("/admin", Admin),
        RouteRule::new("/api/admin", Admin),
    ]
}
