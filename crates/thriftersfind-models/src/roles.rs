//! Role models.
//!
//! A role is only a name. Permission flags live on the user; the role name
//! feeds the hardcoded overrides of the permission engine.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thriftersfind_core::permissions::role_names;
use uuid::Uuid;

/// The role as attached to a resolved user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RoleInfo {
    pub id: Uuid,
    pub name: String,
}

/// Roles created by `seed-roles`.
pub const DEFAULT_ROLES: &[&str] = &[
    role_names::SUPER_ADMIN,
    role_names::ADMIN,
    role_names::STAFF,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roles_are_lowercase_and_unique() {
        for (i, name) in DEFAULT_ROLES.iter().enumerate() {
            assert_eq!(*name, name.to_lowercase());
            assert!(!DEFAULT_ROLES[i + 1..].contains(name));
        }
    }
}
