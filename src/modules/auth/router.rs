use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{current_user, login_user, logout_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/logout", post(logout_user))
        .route("/me", get(current_user))
}
