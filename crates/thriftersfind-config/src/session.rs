//! Session cookie configuration.
//!
//! # Environment Variables
//!
//! - `SESSION_COOKIE_NAME`: Name of the session cookie (default: `tf_session`)
//! - `SESSION_TTL_SECONDS`: Lifetime of a new session, at most one year
//!   (default: 604800, 7 days)
//! - `SESSION_COOKIE_SECURE`: Mark the cookie `Secure` (default: false)

/// Longest accepted session lifetime: one year.
pub const MAX_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Settings for the cookie-backed login session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "tf_session".to_string(),
            ttl_seconds: 604800, // 7 days
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    /// Loads the configuration from the process environment.
    ///
    /// Unset or unparsable variables fall back to [`SessionConfig::default`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            cookie_name: get("SESSION_COOKIE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cookie_name),
            ttl_seconds: get("SESSION_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| (1..=MAX_TTL_SECONDS).contains(ttl))
                .unwrap_or(defaults.ttl_seconds),
            secure_cookie: get("SESSION_COOKIE_SECURE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(defaults.secure_cookie),
        }
    }
}
