use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures of the role classification and save pipeline.
#[derive(Error, Debug)]
pub enum RoleError {
    /// The upstream Discord API could not be reached or returned an error status.
    ///
    /// Raised for whole-request lookups (role list, member). Individual grant and
    /// revoke failures are reported per role in the save outcome instead. Results in a
    /// 503 Service Unavailable response.
    #[error("Discord API unavailable: {0}")]
    UpstreamUnavailable(#[source] Box<serenity::Error>),

    /// Every submitted role was restricted, leaving nothing to apply.
    ///
    /// Results in a 422 Unprocessable Entity response.
    #[error("Request contains no assignable role changes")]
    NoEffectiveChange,

    /// The save request body does not have the expected shape.
    ///
    /// Results in a 422 Unprocessable Entity response.
    #[error("Malformed role change payload: {0}")]
    MalformedPayload(String),
}

impl From<serenity::Error> for RoleError {
    fn from(err: serenity::Error) -> Self {
        RoleError::UpstreamUnavailable(Box::new(err))
    }
}

impl IntoResponse for RoleError {
    fn into_response(self) -> Response {
        match self {
            Self::UpstreamUnavailable(err) => {
                tracing::error!("Discord API request failed: {}", err);

                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorDto {
                        error: "Discord is unavailable, please try again later.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::NoEffectiveChange => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorDto {
                    error: "None of the submitted roles can be changed.".to_string(),
                }),
            )
                .into_response(),
            Self::MalformedPayload(reason) => {
                tracing::debug!("Rejected role change payload: {}", reason);

                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorDto {
                        error: "Invalid role change request.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
