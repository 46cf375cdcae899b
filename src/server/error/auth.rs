use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// No CSRF token was stored in the session when the callback arrived.
    ///
    /// Typically the session expired or the callback was opened in another browser.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to missing CSRF state in session")]
    CsrfMissingValue,

    /// Discord rejected the authorization code exchange.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Failed to exchange authorization code for access token: {0}")]
    TokenExchange(String),

    /// No access token is stored in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("No access token in session")]
    Unauthenticated,

    /// Discord rejected the session's access token.
    ///
    /// The token was revoked or has expired upstream. Results in a 401 Unauthorized
    /// response.
    #[error("Discord rejected the session access token")]
    TokenRejected,
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `CsrfValidationFailed` / `CsrfMissingValue` / `TokenExchange` → 400 Bad Request with
///   "There was an issue logging you in"
/// - `Unauthenticated` / `TokenRejected` → 401 Unauthorized
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::CsrfValidationFailed | Self::CsrfMissingValue | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "There was an issue logging you in, please try again.".to_string(),
                }),
            )
                .into_response(),
            Self::Unauthenticated | Self::TokenRejected => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "You must be logged in with Discord.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
