//! Sidebar navigation and its filtering.
//!
//! Entries are kept or dropped by running their path through
//! [`can_access`]; the `permission` field is informational. Collapsible
//! groups carry static children that follow the parent's visibility.

use serde::Serialize;

use crate::access::can_access;
use crate::permissions::{PermissionFlag, PermissionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavChild {
    pub path: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub path: &'static str,
    pub label: &'static str,
    /// `None` marks an entry that is always shown to a signed-in user.
    pub permission: Option<PermissionFlag>,
    #[serde(skip_serializing_if = "has_no_children")]
    pub children: &'static [NavChild],
}

impl NavEntry {
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

fn has_no_children(children: &&[NavChild]) -> bool {
    children.is_empty()
}

const fn link(path: &'static str, label: &'static str, flag: PermissionFlag) -> NavEntry {
    NavEntry {
        path,
        label,
        permission: Some(flag),
        children: &[],
    }
}

const fn child(path: &'static str, label: &'static str) -> NavChild {
    NavChild { path, label }
}

/// The OMS sidebar, in display order.
pub const STANDARD_NAVIGATION: &[NavEntry] = &[
    link("/dashboard", "Dashboard", PermissionFlag::Dashboard),
    link("/sales", "Sales", PermissionFlag::Sales),
    link("/orders", "Orders", PermissionFlag::Orders),
    NavEntry {
        path: "/pre-orders",
        label: "Pre-orders",
        permission: Some(PermissionFlag::PreOrders),
        children: &[
            child("/pre-orders", "All Pre-orders"),
            child("/pre-orders/inventory", "Pre-order Inventory"),
        ],
    },
    link("/batches", "Batches", PermissionFlag::Batches),
    link("/inventory", "Inventory", PermissionFlag::Inventory),
    link("/warehouses", "Warehouses", PermissionFlag::Warehouses),
    link("/stations", "Stations", PermissionFlag::Stations),
    link("/customers", "Customers", PermissionFlag::Customers),
    link("/reports", "Reports", PermissionFlag::Reports),
    link("/users", "Users", PermissionFlag::Users),
    link("/admin", "Admin Manage", PermissionFlag::AdminManage),
    NavEntry {
        path: "/settings",
        label: "Settings",
        permission: Some(PermissionFlag::Settings),
        children: &[
            child("/settings", "General"),
            child("/settings/branches", "Branches"),
            child("/settings/roles", "Roles"),
        ],
    },
    NavEntry {
        path: "/profile",
        label: "Profile",
        permission: None,
        children: &[],
    },
];

/// Keeps the entries the user may open, preserving order.
pub fn filter_navigation<'a>(
    entries: &'a [NavEntry],
    permissions: Option<&PermissionSet>,
    role_name: Option<&str>,
) -> Vec<&'a NavEntry> {
    entries
        .iter()
        .filter(|entry| can_access(entry.path, permissions, role_name))
        .collect()
}
