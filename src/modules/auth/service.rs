use thriftersfind_core::{AppError, verify_password};
use thriftersfind_db::SessionStore;
use thriftersfind_models::{LoginRequest, SessionUser};
use tracing::{info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Verifies the credentials and opens a session.
    ///
    /// Returns the session token and the resolved user. Unknown email and
    /// wrong password fail with the same message.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn login_user(
        store: &dyn SessionStore,
        dto: LoginRequest,
        ttl_seconds: i64,
    ) -> Result<(String, SessionUser), AppError> {
        let Some(credentials) = store.find_credentials(&dto.email).await? else {
            warn!("Login for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            warn!(user_id = %credentials.id, "Login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = store.create_session(credentials.id, ttl_seconds).await?;
        let user = store.resolve(&token).await?.ok_or_else(|| {
            AppError::internal(anyhow::anyhow!("Session vanished right after creation"))
        })?;

        info!(user_id = %user.id, role = ?user.role_name(), "User signed in");
        Ok((token, user))
    }

    #[instrument(skip_all)]
    pub async fn logout_user(store: &dyn SessionStore, token: Option<&str>) -> Result<(), AppError> {
        if let Some(token) = token {
            store.revoke(token).await?;
        }
        Ok(())
    }
}
