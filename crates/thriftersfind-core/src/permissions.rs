//! Per-user permission flags.
//!
//! Every user carries a fixed record of boolean flags, one per feature area of
//! the OMS. The flags are independent of the user's role; the role name only
//! feeds the hardcoded overrides in [`crate::access`].
//!
//! # Example
//!
//! ```
//! use thriftersfind_core::permissions::{PermissionFlag, PermissionSet};
//!
//! let perms = PermissionSet::only(&[PermissionFlag::Orders, PermissionFlag::Inventory]);
//! assert!(perms.get(PermissionFlag::Orders));
//! assert!(!perms.get(PermissionFlag::Sales));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::serde::deserialize_flag;

/// Role names with hardcoded behavior.
pub mod role_names {
    /// Withheld from the dashboard and sales regardless of flags.
    pub const STAFF: &str = "staff";
    pub const ADMIN: &str = "admin";
    /// Maintenance commands keep every flag set for this role.
    pub const SUPER_ADMIN: &str = "super admin";
}

/// A single feature-area flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionFlag {
    Dashboard,
    Orders,
    Batches,
    Inventory,
    Customers,
    Reports,
    Users,
    Settings,
    AdminManage,
    Stations,
    PreOrders,
    Warehouses,
    Sales,
}

impl PermissionFlag {
    pub const ALL: [PermissionFlag; 13] = [
        PermissionFlag::Dashboard,
        PermissionFlag::Orders,
        PermissionFlag::Batches,
        PermissionFlag::Inventory,
        PermissionFlag::Customers,
        PermissionFlag::Reports,
        PermissionFlag::Users,
        PermissionFlag::Settings,
        PermissionFlag::AdminManage,
        PermissionFlag::Stations,
        PermissionFlag::PreOrders,
        PermissionFlag::Warehouses,
        PermissionFlag::Sales,
    ];

    /// The key used for this flag in the stored JSON record.
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionFlag::Dashboard => "dashboard",
            PermissionFlag::Orders => "orders",
            PermissionFlag::Batches => "batches",
            PermissionFlag::Inventory => "inventory",
            PermissionFlag::Customers => "customers",
            PermissionFlag::Reports => "reports",
            PermissionFlag::Users => "users",
            PermissionFlag::Settings => "settings",
            PermissionFlag::AdminManage => "adminManage",
            PermissionFlag::Stations => "stations",
            PermissionFlag::PreOrders => "preOrders",
            PermissionFlag::Warehouses => "warehouses",
            PermissionFlag::Sales => "sales",
        }
    }
}

impl fmt::Display for PermissionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flag record attached to a user.
///
/// Missing keys and `null` values both deserialize to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionSet {
    #[serde(deserialize_with = "deserialize_flag")]
    pub dashboard: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub orders: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub batches: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub inventory: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub customers: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub reports: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub users: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub settings: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub admin_manage: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub stations: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub pre_orders: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub warehouses: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub sales: bool,
}

impl PermissionSet {
    /// Every flag set.
    pub fn all() -> Self {
        Self::only(&PermissionFlag::ALL)
    }

    /// Only the given flags set.
    pub fn only(flags: &[PermissionFlag]) -> Self {
        let mut set = Self::default();
        for flag in flags {
            set.set(*flag, true);
        }
        set
    }

    pub fn get(&self, flag: PermissionFlag) -> bool {
        match flag {
            PermissionFlag::Dashboard => self.dashboard,
            PermissionFlag::Orders => self.orders,
            PermissionFlag::Batches => self.batches,
            PermissionFlag::Inventory => self.inventory,
            PermissionFlag::Customers => self.customers,
            PermissionFlag::Reports => self.reports,
            PermissionFlag::Users => self.users,
            PermissionFlag::Settings => self.settings,
            PermissionFlag::AdminManage => self.admin_manage,
            PermissionFlag::Stations => self.stations,
            PermissionFlag::PreOrders => self.pre_orders,
            PermissionFlag::Warehouses => self.warehouses,
            PermissionFlag::Sales => self.sales,
        }
    }

    pub fn set(&mut self, flag: PermissionFlag, value: bool) {
        let slot = match flag {
            PermissionFlag::Dashboard => &mut self.dashboard,
            PermissionFlag::Orders => &mut self.orders,
            PermissionFlag::Batches => &mut self.batches,
            PermissionFlag::Inventory => &mut self.inventory,
            PermissionFlag::Customers => &mut self.customers,
            PermissionFlag::Reports => &mut self.reports,
            PermissionFlag::Users => &mut self.users,
            PermissionFlag::Settings => &mut self.settings,
            PermissionFlag::AdminManage => &mut self.admin_manage,
            PermissionFlag::Stations => &mut self.stations,
            PermissionFlag::PreOrders => &mut self.pre_orders,
            PermissionFlag::Warehouses => &mut self.warehouses,
            PermissionFlag::Sales => &mut self.sales,
        };
        *slot = value;
    }

    /// Reads a flag from a set that may be absent. Absent means every flag is off.
    pub fn flag(permissions: Option<&PermissionSet>, flag: PermissionFlag) -> bool {
        permissions.is_some_and(|p| p.get(flag))
    }

    /// Flags currently set, in [`PermissionFlag::ALL`] order.
    pub fn granted(&self) -> Vec<PermissionFlag> {
        PermissionFlag::ALL
            .into_iter()
            .filter(|f| self.get(*f))
            .collect()
    }
}
