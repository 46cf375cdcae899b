use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use serenity::http::Http;
use std::sync::Arc;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

/// Builds the HTTP client used for OAuth2 and user-credentialed Discord calls.
///
/// Redirects are disabled so a response can never bounce the client to an internal
/// address.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - The TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the Discord OAuth2 client from configuration.
///
/// # Arguments
/// - `config` - Application configuration holding client credentials and endpoint URLs
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorization, token, and redirect URLs set
/// - `Err(ConfigError::InvalidUrl)` - One of the URLs could not be parsed
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, ConfigError> {
    let invalid = |value: &str| {
        let value = value.to_string();
        move |source| ConfigError::InvalidUrl { value, source }
    };

    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(config.discord_auth_url.clone())
                .map_err(invalid(&config.discord_auth_url))?,
        )
        .set_token_uri(
            TokenUrl::new(config.discord_token_url.clone())
                .map_err(invalid(&config.discord_token_url))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(config.discord_redirect_url.clone())
                .map_err(invalid(&config.discord_redirect_url))?,
        );

    Ok(client)
}

/// Builds the bot-credentialed Discord HTTP client.
pub fn setup_discord_http(config: &Config) -> Arc<Http> {
    Arc::new(Http::new(&config.discord_bot_token))
}

/// Builds the session layer.
///
/// Sessions are held in memory and expire after seven days without a request. Cookies
/// are sent over plain HTTP since TLS is terminated in front of the server.
pub fn setup_session() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)))
}
