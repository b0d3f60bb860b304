//! Longest-prefix route table.
//!
//! Prefixes match on path segment boundaries: `/admin` covers `/admin` and
//! `/admin/accounts` but not `/administrator`. Paths that no rule covers
//! require an authenticated caller.

use std::collections::HashMap;

use hostel_core::config::{RouteAccess, RouteRule};
use hostel_core::error::AppError;

/// Access level for paths no rule covers.
pub const UNMATCHED_ACCESS: RouteAccess = RouteAccess::Authenticated;

/// Immutable route table, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Normalized rules, longest prefix first.
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Builds the table, rejecting relative prefixes and duplicates.
    pub fn new(rules: &[RouteRule]) -> Result<Self, AppError> {
        let mut seen: HashMap<String, RouteAccess> = HashMap::with_capacity(rules.len());
        let mut normalized = Vec::with_capacity(rules.len());

        for rule in rules {
            let prefix = normalize(&rule.prefix)?;
            if let Some(existing) = seen.insert(prefix.clone(), rule.access) {
                return Err(AppError::configuration(format!(
                    "Route prefix '{prefix}' is defined twice ({existing} and {})",
                    rule.access
                )));
            }
            normalized.push(RouteRule::new(prefix, rule.access));
        }

        normalized.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Ok(Self { rules: normalized })
    }

    /// The access level required for `path`.
    pub fn classify(&self, path: &str) -> RouteAccess {
        self.rules
            .iter()
            .find(|rule| covers(&rule.prefix, path))
            .map(|rule| rule.access)
            .unwrap_or(UNMATCHED_ACCESS)
    }

    /// The rules, longest prefix first.
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

fn normalize(prefix: &str) -> Result<String, AppError> {
    let prefix = prefix.trim();
    if !prefix.starts_with('/') {
        return Err(AppError::configuration(format!(
            "Route prefix '{prefix}' must start with '/'"
        )));
    }
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Whether `prefix` covers `path` on a segment boundary.
pub fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
