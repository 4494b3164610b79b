//! # ThriftersFind Core
//!
//! Access-control core and shared error type for the ThriftersFind OMS.
//!
//! - [`permissions`]: Per-user permission flags and well-known role names
//! - [`access`]: The ordered path rule table and [`can_access`]
//! - [`navigation`]: Sidebar entries and [`filter_navigation`]
//! - [`redirect`]: What a page load does after a denial
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! Nothing in this crate performs I/O. Callers resolve the user's role and
//! permission flags first and pass them in as plain values.
//!
//! # Example
//!
//! ```ignore
//! use thriftersfind_core::{PageOutcome, PermissionSet, gate_page};
//!
//! match gate_page(path, user.permissions.as_ref(), user.role_name()) {
//!     PageOutcome::Render => render(),
//!     PageOutcome::Redirect(target) => redirect(target),
//!     PageOutcome::Denied => access_denied(),
//! }
//! ```

pub mod access;
pub mod errors;
pub mod navigation;
pub mod password;
pub mod permissions;
pub mod redirect;
pub mod serde;

// Re-export commonly used types at crate root
pub use access::{can_access, normalize_path};
pub use errors::AppError;
pub use navigation::{NavEntry, STANDARD_NAVIGATION, filter_navigation};
pub use password::{hash_password, verify_password};
pub use permissions::{PermissionFlag, PermissionSet};
pub use redirect::{PageOutcome, gate_page};
