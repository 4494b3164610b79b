use axum::{Router, middleware, routing::get};

use crate::middleware::access::require_page_access;
use crate::state::AppState;

use super::controller::render_page;

/// Every page path, gated by the permission engine.
///
/// The catch-all also serves paths no access rule knows about; those are
/// rendered for any user with a role.
pub fn init_pages_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(render_page))
        .route("/{*path}", get(render_page))
        .route_layer(middleware::from_fn_with_state(state, require_page_access))
}
