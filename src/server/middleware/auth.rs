use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
};

/// Gate in front of every endpoint that needs a logged-in member.
pub struct AuthGuard<'a> {
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Requires a Discord access token in the session.
    ///
    /// # Returns
    /// - `Ok(String)` - The stored access token
    /// - `Err(AppError::AuthErr(Unauthenticated))` - No token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn require(&self) -> Result<String, AppError> {
        let Some(access_token) = AuthSession::new(self.session).get_access_token().await? else {
            return Err(AuthError::Unauthenticated.into());
        };

        Ok(access_token)
    }
}
