mod model;
mod server;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router::router, startup, state::AppState,
};

const DEFAULT_LOG_FILTER: &str = "rolebot=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;

    let categories: Vec<&str> = config
        .role_rules
        .rules()
        .iter()
        .map(|rule| rule.category())
        .collect();
    tracing::info!(
        "Managing roles for guild {} with categories: {}",
        config.guild_id,
        categories.join(", ")
    );

    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let discord_http = startup::setup_discord_http(&config);

    let bind_address = config.bind_address.clone();
    let state = AppState::new(Arc::new(config), http_client, oauth_client, discord_http);

    let listener = TcpListener::bind(&bind_address).await?;

    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
