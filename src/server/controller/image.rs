use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::server::state::AppState;

/// GET /images/{*path} - Redirect to the same path on Discord's CDN
pub async fn redirect_image(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> impl IntoResponse {
    Redirect::temporary(&format!("{}/{}", state.config.discord_cdn_url, path))
}
