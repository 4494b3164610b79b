use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::json;
use thriftersfind::router::init_router;
use thriftersfind::state::AppState;
use thriftersfind_config::{CorsConfig, SessionConfig};
use thriftersfind_core::{PermissionFlag, PermissionSet};
use thriftersfind_db::MemorySessionStore;
use thriftersfind_models::{RoleInfo, SessionUser};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<MemorySessionStore>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Signs in and returns the `name=value` pair for the session cookie.
    pub async fn login(&self, email: &str) -> String {
        let response = self.send(login_request(email, TEST_PASSWORD)).await;
        assert_eq!(response.status(), 200);
        session_cookie(&response).expect("login must set the session cookie")
    }
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemorySessionStore::new());
    let state = AppState {
        sessions: store.clone(),
        session_config: SessionConfig::default(),
        cors_config: CorsConfig::default(),
    };

    TestApp {
        router: init_router(state),
        store,
    }
}

/// Registers a user with the given role and flags, using the shared test password.
pub async fn create_test_user(
    app: &TestApp,
    email: &str,
    role: Option<&str>,
    flags: &[PermissionFlag],
) -> SessionUser {
    let user = SessionUser {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: email.to_string(),
        role: role.map(|name| RoleInfo {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }),
        permissions: Some(PermissionSet::only(flags)),
    };

    let hashed = bcrypt::hash(TEST_PASSWORD, 4).unwrap();
    app.store.insert_user(user.clone(), hashed).await;
    user
}

pub fn generate_unique_email() -> String {
    format!("test_{}@thriftersfind.test", Uuid::new_v4())
}

pub fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap()
}

#[allow(dead_code)]
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// The `name=value` part of the `Set-Cookie` header for the session cookie.
pub fn session_cookie(response: &Response) -> Option<String> {
    let name = SessionConfig::default().cookie_name;
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(str::to_string)
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
