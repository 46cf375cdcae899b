//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods relevant
//! to its concern:
//! - `AuthSession` - Discord access token and when it was issued
//! - `CsrfSession` - CSRF token management for the OAuth flow

use chrono::{DateTime, Utc};
use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_AUTH_ACCESS_TOKEN: &str = "auth:access_token";
const SESSION_AUTH_ISSUED_AT: &str = "auth:issued_at";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
///
/// Holds the member's Discord access token. The token itself is the only credential;
/// the member's identity is always resolved from Discord with it.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the access token and the time it was issued.
    ///
    /// # Arguments
    /// - `access_token` - Discord OAuth2 access token
    /// - `issued_at` - When the token was obtained
    ///
    /// # Returns
    /// - `Ok(())` - Token successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_access_token(
        &self,
        access_token: String,
        issued_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_ACCESS_TOKEN, access_token)
            .await?;
        self.session
            .insert(SESSION_AUTH_ISSUED_AT, issued_at)
            .await?;
        Ok(())
    }

    /// Retrieves the access token from the session.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - Member is logged in
    /// - `Ok(None)` - No token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_access_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.get(SESSION_AUTH_ACCESS_TOKEN).await?;
        Ok(token)
    }

    pub async fn get_issued_at(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        let issued_at = self.session.get(SESSION_AUTH_ISSUED_AT).await?;
        Ok(issued_at)
    }

    /// Clears all data from the session.
    ///
    /// Used during logout and when Discord rejects the stored token.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management.
///
/// Handles CSRF token storage and validation for OAuth flows. Tokens are stored
/// during login initiation and validated during the OAuth callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores a CSRF token in the session.
    ///
    /// # Arguments
    /// - `token` - The CSRF token to store
    ///
    /// # Returns
    /// - `Ok(())` - Token successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token from the session.
    ///
    /// The token is removed so each one can only be used once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - CSRF token was found and removed
    /// - `Ok(None)` - No CSRF token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
