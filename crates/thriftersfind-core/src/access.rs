//! Path-based access decisions.
//!
//! [`can_access`] is a pure function of the request path, the user's
//! [`PermissionSet`] and the user's role name. The rules live in
//! [`ACCESS_RULES`], an ordered table evaluated top to bottom; the first rule
//! whose matcher accepts the path decides. When nothing matches, the
//! decision is [`UNMAPPED_PATH_DECISION`].
//!
//! # Unmapped paths are allowed
//!
//! A path that no rule recognizes is *allowed* for any caller with a role.
//! Adding a feature area without adding its prefix to [`ACCESS_RULES`]
//! therefore leaves it open to every signed-in user. The table has to be
//! kept in step with the routes.
//!
//! # Example
//!
//! ```
//! use thriftersfind_core::access::can_access;
//! use thriftersfind_core::permissions::{PermissionFlag, PermissionSet};
//!
//! let perms = PermissionSet::only(&[PermissionFlag::Orders]);
//!
//! assert!(can_access("/orders/42", Some(&perms), Some("staff")));
//! assert!(!can_access("/dashboard", Some(&perms), Some("staff")));
//! assert!(!can_access("/profile", Some(&perms), None));
//! ```

use crate::permissions::{PermissionFlag, PermissionSet, role_names};

/// How a rule recognizes a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatcher {
    /// Equal to one of the listed paths.
    Exact(&'static [&'static str]),
    /// Equal to the prefix, or the prefix followed by `/`.
    Section(&'static str),
    /// Any path starting with the prefix, without a segment boundary.
    RawPrefix(&'static str),
}

impl PathMatcher {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatcher::Exact(paths) => paths.iter().any(|p| *p == path),
            PathMatcher::Section(prefix) => path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
            PathMatcher::RawPrefix(prefix) => path.starts_with(prefix),
        }
    }
}

/// What a matched rule demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    /// Role override: anyone except the staff role.
    NotStaff,
    Flag(PermissionFlag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRule {
    pub matcher: PathMatcher,
    pub requirement: Requirement,
}

const fn rule(matcher: PathMatcher, requirement: Requirement) -> AccessRule {
    AccessRule {
        matcher,
        requirement,
    }
}

const fn section(prefix: &'static str, flag: PermissionFlag) -> AccessRule {
    rule(PathMatcher::Section(prefix), Requirement::Flag(flag))
}

/// Root-like paths. Denial on one of these triggers the redirect policy.
pub const ROOT_PATHS: &[&str] = &["/dashboard", "/", ""];

/// Ordered rule table. Role overrides come before the generic section flags.
pub const ACCESS_RULES: &[AccessRule] = &[
    rule(PathMatcher::Section("/profile"), Requirement::Always),
    rule(PathMatcher::Exact(ROOT_PATHS), Requirement::NotStaff),
    rule(PathMatcher::RawPrefix("/sales"), Requirement::NotStaff),
    rule(
        PathMatcher::RawPrefix("/admin"),
        Requirement::Flag(PermissionFlag::AdminManage),
    ),
    section("/orders", PermissionFlag::Orders),
    section("/batches", PermissionFlag::Batches),
    section("/inventory", PermissionFlag::Inventory),
    section("/customers", PermissionFlag::Customers),
    section("/stations", PermissionFlag::Stations),
    section("/warehouses", PermissionFlag::Warehouses),
    section("/pre-orders", PermissionFlag::PreOrders),
    section("/reports", PermissionFlag::Reports),
    section("/users", PermissionFlag::Users),
    section("/settings", PermissionFlag::Settings),
];

/// Decision for paths no rule recognizes. Fail-open; see the module docs.
pub const UNMAPPED_PATH_DECISION: bool = true;

/// Finds the rule that governs `path`, if any.
pub fn matching_rule(path: &str) -> Option<&'static AccessRule> {
    ACCESS_RULES.iter().find(|r| r.matcher.matches(path))
}

/// Decides whether a user may open `path`.
///
/// `path` must already be normalized (see [`normalize_path`]). A missing or
/// empty role denies everything, including `/profile` and unmapped paths.
/// Role names compare case-insensitively.
pub fn can_access(
    path: &str,
    permissions: Option<&PermissionSet>,
    role_name: Option<&str>,
) -> bool {
    let role = match role_name {
        Some(role) if !role.is_empty() => role.to_lowercase(),
        _ => return false,
    };
    let is_staff = role == role_names::STAFF;

    match matching_rule(path) {
        Some(rule) => match rule.requirement {
            Requirement::Always => true,
            Requirement::NotStaff => !is_staff,
            Requirement::Flag(flag) => PermissionSet::flag(permissions, flag),
        },
        None => UNMAPPED_PATH_DECISION,
    }
}

/// Normalizes a request path for [`can_access`].
///
/// Drops any query string or fragment and strips trailing slashes, keeping
/// the root as `/`.
pub fn normalize_path(raw: &str) -> &str {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: &[(&str, PermissionFlag)] = &[
        ("/orders", PermissionFlag::Orders),
        ("/batches", PermissionFlag::Batches),
        ("/inventory", PermissionFlag::Inventory),
        ("/customers", PermissionFlag::Customers),
        ("/stations", PermissionFlag::Stations),
        ("/warehouses", PermissionFlag::Warehouses),
        ("/pre-orders", PermissionFlag::PreOrders),
        ("/reports", PermissionFlag::Reports),
        ("/users", PermissionFlag::Users),
        ("/settings", PermissionFlag::Settings),
    ];

    #[test]
    fn test_missing_role_denies_everything() {
        let all = PermissionSet::all();
        for path in ["/profile", "/profile/edit", "/", "/orders", "/unmapped"] {
            assert!(!can_access(path, Some(&all), None), "{path}");
            assert!(!can_access(path, Some(&all), Some("")), "{path}");
        }
    }

    #[test]
    fn test_profile_always_allowed_with_role() {
        assert!(can_access("/profile", None, Some("staff")));
        assert!(can_access("/profile/x", None, Some("super admin")));
        assert!(can_access("/profile", Some(&PermissionSet::default()), Some("admin")));
    }

    #[test]
    fn test_dashboard_role_override() {
        let perms = PermissionSet::only(&[PermissionFlag::Dashboard]);
        assert!(!can_access("/dashboard", Some(&perms), Some("staff")));
        assert!(!can_access("/dashboard", Some(&perms), Some("STAFF")));
        assert!(!can_access("/", Some(&perms), Some("staff")));
        assert!(!can_access("", Some(&perms), Some("staff")));

        let none = PermissionSet::default();
        for path in ROOT_PATHS {
            assert!(can_access(path, Some(&none), Some("super admin")));
            assert!(can_access(path, None, Some("admin")));
        }
    }

    #[test]
    fn test_sales_role_override() {
        let all = PermissionSet::all();
        assert!(!can_access("/sales", Some(&all), Some("staff")));
        assert!(!can_access("/sales/2024", Some(&all), Some("Staff")));
        assert!(can_access("/sales", None, Some("super admin")));
        // Raw prefix, no segment boundary.
        assert!(can_access("/salesforce", None, Some("super admin")));
        assert!(!can_access("/salesforce", Some(&all), Some("staff")));
    }

    #[test]
    fn test_admin_requires_flag_regardless_of_role() {
        let without = PermissionSet::default();
        let with = PermissionSet::only(&[PermissionFlag::AdminManage]);

        assert!(!can_access("/admin", Some(&without), Some("super admin")));
        assert!(can_access("/admin/x", Some(&with), Some("staff")));
        assert!(can_access("/administration", Some(&with), Some("staff")));
        assert!(!can_access("/admin", None, Some("super admin")));
    }

    #[test]
    fn test_each_section_follows_its_flag() {
        for (prefix, flag) in SECTIONS {
            let granted = PermissionSet::only(&[*flag]);
            let denied = PermissionSet::default();
            let sub = format!("{prefix}/sub");

            assert!(can_access(prefix, Some(&granted), Some("super admin")), "{prefix}");
            assert!(!can_access(prefix, Some(&denied), Some("super admin")), "{prefix}");
            assert!(can_access(&sub, Some(&granted), Some("super admin")), "{sub}");
            assert!(!can_access(&sub, Some(&denied), Some("super admin")), "{sub}");
        }
    }

    #[test]
    fn test_section_flags_ignore_other_flags() {
        for (prefix, flag) in SECTIONS {
            let mut everything_else = PermissionSet::all();
            everything_else.set(*flag, false);
            assert!(!can_access(prefix, Some(&everything_else), Some("admin")), "{prefix}");
        }
    }

    #[test]
    fn test_section_requires_segment_boundary() {
        let perms = PermissionSet::default();
        // Unmapped, so the fallback applies rather than the orders flag.
        assert!(can_access("/ordersfoo", Some(&perms), Some("super admin")));
        assert!(!can_access("/orders", Some(&perms), Some("super admin")));
    }

    #[test]
    fn test_orders_has_no_staff_override() {
        let granted = PermissionSet::only(&[PermissionFlag::Orders]);
        assert!(can_access("/orders", Some(&granted), Some("staff")));
        assert!(!can_access("/orders", Some(&PermissionSet::default()), Some("staff")));
    }

    #[test]
    fn test_unmapped_paths_fall_open() {
        // Regression guard: flipping this means every new route needs a rule.
        assert!(UNMAPPED_PATH_DECISION);
        assert!(matching_rule("/some-unmapped-route").is_none());
        assert!(can_access("/some-unmapped-route", None, Some("super admin")));
        assert!(can_access("/some-unmapped-route", None, Some("staff")));
    }

    #[test]
    fn test_absent_permissions_deny_flag_rules() {
        for (prefix, _) in SECTIONS {
            assert!(!can_access(prefix, None, Some("super admin")), "{prefix}");
        }
    }

    #[test]
    fn test_rule_order_puts_overrides_first() {
        let first_flag_rule = ACCESS_RULES
            .iter()
            .position(|r| matches!(r.matcher, PathMatcher::Section(p) if p != "/profile"))
            .unwrap();
        let last_override = ACCESS_RULES
            .iter()
            .rposition(|r| r.requirement == Requirement::NotStaff)
            .unwrap();
        assert!(last_override < first_flag_rule);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//"), "/");
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("/orders/"), "/orders");
        assert_eq!(normalize_path("/orders/12?tab=items"), "/orders/12");
        assert_eq!(normalize_path("/?next=/orders"), "/");
        assert_eq!(normalize_path("/reports#top"), "/reports");
    }
}
