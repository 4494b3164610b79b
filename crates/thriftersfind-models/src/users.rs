//! User models.

use serde::{Deserialize, Serialize};
use thriftersfind_core::PermissionSet;
use uuid::Uuid;

use crate::roles::RoleInfo;

/// A user as resolved from a session cookie.
///
/// This is the only user shape the permission engine sees. Either part may
/// be missing: a user without a role is denied everywhere, and a user without
/// a permission record has every flag off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<RoleInfo>,
    pub permissions: Option<PermissionSet>,
}

impl SessionUser {
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.name.as_str())
    }

    pub fn permissions(&self) -> Option<&PermissionSet> {
        self.permissions.as_ref()
    }
}

/// What the login flow needs to verify a password.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub password_hash: String,
}
