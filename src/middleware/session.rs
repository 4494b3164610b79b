use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};
use axum_extra::extract::CookieJar;
use thriftersfind_config::SessionConfig;
use thriftersfind_core::AppError;
use thriftersfind_models::SessionUser;

use crate::state::AppState;

/// Extractor that resolves the session cookie to the signed-in user.
///
/// Rejects with 401 when the cookie is missing or the session is unknown or
/// expired. The page gate stores the resolved user in the request extensions,
/// so handlers behind it do not hit the session store twice.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl CurrentUser {
    pub fn role_name(&self) -> Option<&str> {
        self.0.role_name()
    }
}

/// Reads the session token from the request cookies.
pub fn session_token(headers: &HeaderMap, config: &SessionConfig) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(&config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = session_token(&parts.headers, &state.session_config)
            .ok_or_else(|| AppError::unauthorized("Not signed in"))?;

        let user = state
            .sessions
            .resolve(&token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session expired or invalid"))?;

        Ok(CurrentUser(user))
    }
}
