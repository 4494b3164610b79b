//! # ThriftersFind Models
//!
//! Domain models and DTOs for the ThriftersFind OMS.
//!
//! - [`auth`]: Login request and plain message responses
//! - [`navigation`]: Navigation, access-check, and gated-page responses
//! - [`roles`]: Roles and the default role names
//! - [`users`]: The session-resolved user shape

pub mod auth;
pub mod navigation;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, MessageResponse};
pub use navigation::{
    AccessCheckResponse, AccessDeniedResponse, AccessQuery, DenialAction, NavigationResponse,
    PageResponse,
};
pub use roles::{DEFAULT_ROLES, RoleInfo};
pub use users::{SessionUser, UserCredentials};
