use axum::{
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, image, role, user},
    startup::setup_session,
    state::AppState,
};

/// Static assets may be cached by browsers for a week.
const STATIC_CACHE_CONTROL: &str = "max-age=604800";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "rolebot",
        description = "Self-service role management for a Discord guild"
    ),
    tags(
        (name = "role", description = "Role classification and role changes"),
        (name = "user", description = "Logged-in member identity and held roles")
    )
)]
pub struct ApiDoc;

/// Builds the complete application router.
///
/// JSON endpoints are registered through `OpenApiRouter` so they appear in the Swagger
/// UI at `/api/docs`. Redirect endpoints are plain routes. Anything unmatched is served
/// from the static directory.
///
/// # Arguments
/// - `state` - Shared application state
///
/// # Returns
/// - `Router` - Router with session, tracing and static file handling attached
pub fn router(state: AppState) -> Router {
    let (api_router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(user::get_identity))
        .routes(routes!(user::get_member_roles))
        .routes(routes!(role::get_roles))
        .routes(routes!(role::save_roles))
        .split_for_parts();

    let static_files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(STATIC_CACHE_CONTROL),
        ))
        .service(ServeDir::new(&state.config.static_dir));

    api_router
        .route("/login", get(auth::login))
        .route("/auth", get(auth::callback))
        .route("/logout", get(auth::logout))
        .route("/images/{*path}", get(image::redirect_image))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .fallback_service(static_files)
        .layer(setup_session())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
