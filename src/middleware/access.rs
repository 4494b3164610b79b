//! Page gate middleware.
//!
//! Runs every page load through [`gate_page`]: allowed pages continue to the
//! handler, denied root-like pages redirect to the first feature the user can
//! open, and any other denial renders the access-denied body with a 403.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use thriftersfind_core::{PageOutcome, gate_page, normalize_path};
use thriftersfind_models::AccessDeniedResponse;
use tracing::{debug, info, warn};

use crate::middleware::session::CurrentUser;
use crate::state::AppState;

pub async fn require_page_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let user = match CurrentUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let path = normalize_path(parts.uri.path()).to_string();
    let outcome = gate_page(&path, user.0.permissions(), user.role_name());

    match outcome {
        PageOutcome::Render => {
            debug!(user_id = %user.0.id, path = %path, "Page access granted");
            parts.extensions.insert(user);
            next.run(Request::from_parts(parts, body)).await
        }
        PageOutcome::Redirect(target) => {
            info!(user_id = %user.0.id, path = %path, target = %target, "Redirecting from denied page");
            Redirect::to(target).into_response()
        }
        PageOutcome::Denied => {
            warn!(
                user_id = %user.0.id,
                role = ?user.role_name(),
                path = %path,
                "Page access denied"
            );
            (
                StatusCode::FORBIDDEN,
                Json(AccessDeniedResponse::for_path(path)),
            )
                .into_response()
        }
    }
}
