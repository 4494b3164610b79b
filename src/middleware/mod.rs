//! Middleware and extractors for request processing.
//!
//! - [`session`]: Resolves the session cookie into a [`session::CurrentUser`]
//! - [`access`]: Page gate applying the permission engine and redirect policy
//!
//! # Request Flow
//!
//! 1. Browser sends the session cookie set by `POST /api/auth/login`
//! 2. `CurrentUser` resolves it through the configured `SessionStore`
//! 3. For page routes, `require_page_access` decides render, redirect, or deny
//! 4. Handler executes if the page may be rendered

pub mod access;
pub mod session;
