use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::{AuthSession, CsrfSession},
    service::auth::AuthService,
    state::AppState,
};

/// Query parameters for the OAuth callback endpoint.
///
/// # Fields
/// - `state` - CSRF protection token that must match the value stored in the session
/// - `code` - Authorization code used to exchange for access tokens
#[derive(Deserialize)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

/// GET /login - Redirect to Discord's OAuth2 consent screen
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.http_client, &state.oauth_client, &state.config);

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// GET /auth - OAuth2 callback
///
/// Validates the CSRF state, exchanges the code for an access token, stores the token
/// in the session and sends the member to the dashboard.
///
/// # Returns
/// - `307 Temporary Redirect` to `/dashboard.html`
/// - `400 Bad Request`: CSRF mismatch or rejected authorization code
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.http_client, &state.oauth_client, &state.config);

    validate_csrf(&session, &params.state).await?;

    let access_token = auth_service.callback(params.code).await?;

    AuthSession::new(&session)
        .set_access_token(access_token, Utc::now())
        .await?;

    Ok(Redirect::temporary("/dashboard.html"))
}

/// GET /logout - Clear the session and return to the landing page
pub async fn logout(session: Session) -> impl IntoResponse {
    AuthSession::new(&session).clear().await;

    Redirect::temporary("/")
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let Some(stored_state) = CsrfSession::new(session).take_token().await? else {
        return Err(AuthError::CsrfMissingValue.into());
    };

    if stored_state != csrf_state {
        return Err(AuthError::CsrfValidationFailed.into());
    }

    Ok(())
}
