use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use thriftersfind_core::AppError;
use thriftersfind_models::{LoginRequest, MessageResponse, SessionUser};
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::session::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Sign in with email and password; sets the session cookie.
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<SessionUser>), AppError> {
    let config = &state.session_config;
    let (token, user) =
        AuthService::login_user(state.sessions.as_ref(), dto, config.ttl_seconds).await?;

    let cookie = Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .build();

    Ok((jar.add(cookie), Json(user)))
}

/// Sign out; revokes the session and clears the cookie.
#[instrument(skip_all)]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let config = &state.session_config;
    let token = jar
        .get(&config.cookie_name)
        .map(|cookie| cookie.value().to_string());
    AuthService::logout_user(state.sessions.as_ref(), token.as_deref()).await?;

    let jar = jar.remove(Cookie::build((config.cookie_name.clone(), "")).path("/"));
    Ok((jar, Json(MessageResponse::new("Signed out"))))
}

pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<SessionUser> {
    Json(user)
}
