use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{check_access, get_navigation};

pub fn init_navigation_router() -> Router<AppState> {
    Router::new()
        .route("/navigation", get(get_navigation))
        .route("/access", get(check_access))
}
