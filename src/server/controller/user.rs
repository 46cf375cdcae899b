use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serenity::all::UserId;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, role::MemberRolesDto, user::UserDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::{auth::AuthGuard, session::AuthSession},
        service::{auth::AuthService, role::RoleService},
        state::AppState,
        util::parse::parse_snowflake,
    },
};

pub static USER_TAG: &str = "user";

/// POST /identity - Resolve the logged-in member and whether they are in the guild
///
/// A token Discord no longer accepts also clears the session, so the next request
/// starts a fresh login.
#[utoipa::path(
    post,
    path = "/identity",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Logged-in member", body = UserDto),
        (status = 401, description = "Not logged in or token rejected by Discord", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_identity(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let access_token = AuthGuard::new(&session).require().await?;

    if let Some(issued_at) = AuthSession::new(&session).get_issued_at().await? {
        tracing::debug!(
            "Resolving identity with access token issued {} minutes ago",
            (Utc::now() - issued_at).num_minutes()
        );
    }

    let auth_service = AuthService::new(&state.http_client, &state.oauth_client, &state.config);

    let user = match auth_service.identity(&access_token).await {
        Ok(user) => user,
        Err(AppError::AuthErr(AuthError::TokenRejected)) => {
            AuthSession::new(&session).clear().await;
            return Err(AuthError::TokenRejected.into());
        }
        Err(e) => return Err(e),
    };

    Ok((StatusCode::OK, Json(user)))
}

/// GET /userroles/{userid} - List the roles a guild member currently holds
#[utoipa::path(
    get,
    path = "/userroles/{userid}",
    tag = USER_TAG,
    params(
        ("userid" = String, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "Member's role IDs", body = MemberRolesDto),
        (status = 400, description = "Invalid user ID", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 503, description = "Discord unavailable or member not found", body = ErrorDto)
    ),
)]
pub async fn get_member_roles(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session).require().await?;

    let user_id = UserId::new(parse_snowflake(&user_id)?);

    let roles = RoleService::new(state.discord.as_ref(), &state.config)
        .get_member_roles(user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MemberRolesDto {
            user_id: user_id.get(),
            roles: roles.into_iter().map(|role_id| role_id.get()).collect(),
        }),
    ))
}
