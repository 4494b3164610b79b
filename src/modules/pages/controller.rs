use axum::Json;
use axum::http::Uri;
use thriftersfind_core::{AppError, STANDARD_NAVIGATION, filter_navigation, normalize_path};
use thriftersfind_models::PageResponse;

use crate::middleware::session::CurrentUser;

/// Layout payload for a page the gate let through: the page path, the
/// signed-in user, and their filtered navigation.
pub async fn render_page(
    CurrentUser(user): CurrentUser,
    uri: Uri,
) -> Result<Json<PageResponse>, AppError> {
    let path = normalize_path(uri.path()).to_string();
    if path == "/api" || path.starts_with("/api/") {
        return Err(AppError::not_found(anyhow::anyhow!("No such endpoint")));
    }

    let navigation = filter_navigation(STANDARD_NAVIGATION, user.permissions(), user.role_name())
        .into_iter()
        .copied()
        .collect();

    Ok(Json(PageResponse {
        path,
        user,
        navigation,
    }))
}
