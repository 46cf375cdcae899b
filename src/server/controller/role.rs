use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::collections::BTreeMap;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        role::{RoleDto, SaveOutcomeDto, SaveRolesDto},
    },
    server::{
        error::{role::RoleError, AppError},
        middleware::auth::AuthGuard,
        model::role_change::{ApplyStatus, RoleChangeRequest},
        service::role::RoleService,
        state::AppState,
    },
};

pub static ROLE_TAG: &str = "role";

/// POST /roles - Classify the guild's roles into dashboard categories
///
/// # Returns
/// - `200 OK`: category name to role list, including `restricted` and `all`
/// - `401 Unauthorized`: Not logged in
/// - `503 Service Unavailable`: Discord role list could not be fetched
#[utoipa::path(
    post,
    path = "/roles",
    tag = ROLE_TAG,
    responses(
        (status = 200, description = "Roles grouped by category", body = BTreeMap<String, Vec<RoleDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 503, description = "Discord unavailable", body = ErrorDto)
    ),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session).require().await?;

    let classification = RoleService::new(state.discord.as_ref(), &state.config)
        .fetch_and_classify()
        .await?;

    let dto: BTreeMap<String, Vec<RoleDto>> = classification.into_dto();

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /save - Grant and revoke roles for a member
///
/// Restricted roles are silently dropped from both lists before anything is applied.
/// The response always carries one result per attempted change.
#[utoipa::path(
    post,
    path = "/save",
    tag = ROLE_TAG,
    request_body = SaveRolesDto,
    responses(
        (status = 200, description = "Every change applied", body = SaveOutcomeDto),
        (status = 207, description = "Some changes failed", body = SaveOutcomeDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 422, description = "Malformed payload or nothing left to change", body = ErrorDto),
        (status = 503, description = "Discord unavailable or every change failed", body = SaveOutcomeDto)
    ),
)]
pub async fn save_roles(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<SaveRolesDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session).require().await?;

    let Json(payload) = payload.map_err(|e| RoleError::MalformedPayload(e.body_text()))?;
    let request = RoleChangeRequest::try_from(payload)?;

    let outcome = RoleService::new(state.discord.as_ref(), &state.config)
        .save(request)
        .await?;

    let status = match outcome.status() {
        ApplyStatus::Success => StatusCode::OK,
        ApplyStatus::Partial => StatusCode::MULTI_STATUS,
        ApplyStatus::Failed => StatusCode::SERVICE_UNAVAILABLE,
    };

    Ok((status, Json(outcome.into_dto())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        extract::FromRequest,
        http::{header::CONTENT_TYPE, Request},
        response::Response,
    };
    use chrono::Utc;
    use std::sync::Arc;
    use test_utils::builder::TestBuilder;

    use crate::{
        model::role::{RoleChangeStatusDto, SaveStatusDto},
        server::{
            middleware::session::AuthSession,
            service::test::{test_state, FakeGuildRoleApi},
        },
    };

    async fn payload(body: &'static str) -> Result<Json<SaveRolesDto>, JsonRejection> {
        let request = Request::post("/save")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        Json::<SaveRolesDto>::from_request(request, &()).await
    }

    /// Posts a save as a logged-in member against the reference guild.
    async fn save(api: FakeGuildRoleApi, body: &'static str) -> Response {
        let mut test = TestBuilder::new().build();
        let session = test.session().clone();
        AuthSession::new(&session)
            .set_access_token("access-token".to_string(), Utc::now())
            .await
            .unwrap();

        save_roles(State(test_state(Arc::new(api))), session, payload(body).await)
            .await
            .into_response()
    }

    async fn outcome(response: Response) -> SaveOutcomeDto {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        serde_json::from_slice(&bytes).unwrap()
    }

    fn fake_api() -> FakeGuildRoleApi {
        let test = TestBuilder::new()
            .with_roles(&[(1, "He/Him"), (2, "Admin"), (3, "CS 220")])
            .build();

        FakeGuildRoleApi::new(&test)
    }

    /// Tests a save where every change applies.
    ///
    /// Expected: 200 OK with status success
    #[tokio::test]
    async fn responds_ok_when_all_applied() {
        let response = save(
            fake_api(),
            r#"{"userID":"11","rolesToAdd":["3"],"rolesToRemove":["1"]}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(outcome(response).await.status, SaveStatusDto::Success);
    }

    /// Tests a save where one of two grants fails upstream.
    ///
    /// Expected: 207 Multi-Status with role 3 reported failed
    #[tokio::test]
    async fn responds_multi_status_on_partial_failure() {
        let response = save(
            fake_api().failing_role(3),
            r#"{"userID":"11","rolesToAdd":["1","3"],"rolesToRemove":[]}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::MULTI_STATUS);

        let outcome = outcome(response).await;
        assert_eq!(outcome.status, SaveStatusDto::Partial);
        assert!(outcome
            .results
            .iter()
            .any(|result| result.id == 3 && result.status == RoleChangeStatusDto::Failed));
        assert!(outcome
            .results
            .iter()
            .any(|result| result.id == 1 && result.status == RoleChangeStatusDto::Applied));
    }

    /// Tests a save where every change fails upstream.
    ///
    /// Expected: 503 Service Unavailable with status failed
    #[tokio::test]
    async fn responds_unavailable_when_all_failed() {
        let response = save(
            fake_api().failing_role(1).failing_role(3),
            r#"{"userID":"11","rolesToAdd":["3"],"rolesToRemove":["1"]}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(outcome(response).await.status, SaveStatusDto::Failed);
    }

    /// Tests a save that only touches restricted roles.
    ///
    /// Expected: 422 Unprocessable Entity
    #[tokio::test]
    async fn rejects_only_restricted_roles() {
        let response = save(
            fake_api(),
            r#"{"userID":"11","rolesToAdd":["2"],"rolesToRemove":["2"]}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    /// Tests a body that does not match the save shape.
    ///
    /// Expected: 422 Unprocessable Entity
    #[tokio::test]
    async fn rejects_malformed_payload() {
        let response = save(fake_api(), r#"{"userID":"11","rolesToAdd":"3"}"#).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
