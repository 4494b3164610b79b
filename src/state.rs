use std::sync::Arc;

use thriftersfind_config::{CorsConfig, SessionConfig};
use thriftersfind_db::{PgSessionStore, SessionStore, init_db_pool, run_migrations};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            sessions,
            session_config: SessionConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

/// Connects to PostgreSQL, applies migrations, drops expired sessions, and
/// builds the shared state.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool().await?;
    run_migrations(&db).await?;

    let sessions = PgSessionStore::new(db);
    let purged = sessions.purge_expired().await.map_err(|e| e.error)?;
    info!(purged, "Expired sessions removed");

    Ok(AppState::new(Arc::new(sessions)))
}
