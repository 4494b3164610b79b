//! Page gating: what to do when the permission engine says no.
//!
//! Denial on a root-like path sends the user to the first feature area they
//! hold a flag for, falling back to the profile page. Denial anywhere else
//! renders the access-denied view. A redirect that would land on the page
//! the user is already on is turned into a denial to avoid a loop.

use crate::access::{ROOT_PATHS, can_access};
use crate::permissions::{PermissionFlag, PermissionSet};

pub const PROFILE_PATH: &str = "/profile";

/// Landing pages tried after a denied root-like path, in priority order.
pub const ROOT_REDIRECT_PRIORITY: &[(PermissionFlag, &str)] = &[
    (PermissionFlag::Orders, "/orders"),
    (PermissionFlag::Batches, "/batches"),
    (PermissionFlag::Inventory, "/inventory"),
    (PermissionFlag::Customers, "/customers"),
    (PermissionFlag::Stations, "/stations"),
    (PermissionFlag::Warehouses, "/warehouses"),
    (PermissionFlag::PreOrders, "/pre-orders"),
    (PermissionFlag::Reports, "/reports"),
    (PermissionFlag::Sales, "/sales"),
    (PermissionFlag::Users, "/users"),
    (PermissionFlag::Settings, "/settings"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Render,
    Redirect(&'static str),
    Denied,
}

pub fn is_root_like(path: &str) -> bool {
    ROOT_PATHS.iter().any(|p| *p == path)
}

/// First landing page whose flag is set, or the profile page.
pub fn first_permitted_path(permissions: Option<&PermissionSet>) -> &'static str {
    first_permitted_in(ROOT_REDIRECT_PRIORITY, permissions)
}

fn first_permitted_in(
    priority: &[(PermissionFlag, &'static str)],
    permissions: Option<&PermissionSet>,
) -> &'static str {
    priority
        .iter()
        .find(|(flag, _)| PermissionSet::flag(permissions, *flag))
        .map(|(_, path)| *path)
        .unwrap_or(PROFILE_PATH)
}

/// What the caller does after access to `current_path` was denied.
pub fn resolve_denial(current_path: &str, permissions: Option<&PermissionSet>) -> PageOutcome {
    resolve_denial_in(ROOT_REDIRECT_PRIORITY, current_path, permissions)
}

fn resolve_denial_in(
    priority: &[(PermissionFlag, &'static str)],
    current_path: &str,
    permissions: Option<&PermissionSet>,
) -> PageOutcome {
    if !is_root_like(current_path) {
        return PageOutcome::Denied;
    }

    let target = first_permitted_in(priority, permissions);
    if target == current_path {
        PageOutcome::Denied
    } else {
        PageOutcome::Redirect(target)
    }
}

/// Runs the permission engine for a page load and applies the denial policy.
pub fn gate_page(
    path: &str,
    permissions: Option<&PermissionSet>,
    role_name: Option<&str>,
) -> PageOutcome {
    if can_access(path, permissions, role_name) {
        PageOutcome::Render
    } else {
        resolve_denial(path, permissions)
    }
}
