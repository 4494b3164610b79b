//! # ThriftersFind CLI
//!
//! Maintenance commands run against the OMS database.
//!
//! ```ignore
//! use thriftersfind_cli::maintenance::{repair_permissions, seed_roles};
//!
//! seed_roles(&pool).await?;
//! let repaired = repair_permissions(&pool).await?;
//! ```

pub mod maintenance;
