//! # ThriftersFind Config
//!
//! Configuration types for the ThriftersFind OMS, loaded from environment
//! variables (usually via a `.env` file read with `dotenvy` at startup).
//!
//! - [`session`]: Session cookie name, lifetime, and flags
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use thriftersfind_config::{CorsConfig, ServerConfig, SessionConfig};
//!
//! let session_config = SessionConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
