use axum::Json;
use axum::extract::Query;
use thriftersfind_core::{STANDARD_NAVIGATION, can_access, filter_navigation, normalize_path};
use thriftersfind_models::{AccessCheckResponse, AccessQuery, NavigationResponse};
use tracing::instrument;

use crate::middleware::session::CurrentUser;

/// Sidebar entries the signed-in user may open.
#[instrument(skip_all, fields(user_id = %user.0.id))]
pub async fn get_navigation(user: CurrentUser) -> Json<NavigationResponse> {
    let items = filter_navigation(STANDARD_NAVIGATION, user.0.permissions(), user.role_name())
        .into_iter()
        .copied()
        .collect();

    Json(NavigationResponse {
        role: user.role_name().map(str::to_string),
        items,
    })
}

/// Access decision for an arbitrary path, without the redirect policy.
#[instrument(skip_all, fields(user_id = %user.0.id, path = %query.path))]
pub async fn check_access(
    user: CurrentUser,
    Query(query): Query<AccessQuery>,
) -> Json<AccessCheckResponse> {
    let path = normalize_path(&query.path);
    let allowed = can_access(path, user.0.permissions(), user.role_name());

    Json(AccessCheckResponse {
        path: path.to_string(),
        allowed,
    })
}
