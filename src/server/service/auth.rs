use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use serenity::all::{GuildId, User as DiscordUser};
use url::Url;

use crate::{
    model::user::UserDto,
    server::{config::Config, error::auth::AuthError, error::AppError, state::OAuth2Client},
};

/// Partial guild information returned from Discord API.
///
/// Contains minimal guild data returned from Discord's user guilds endpoint.
/// Used for checking whether a user belongs to the managed guild.
#[derive(Debug, Deserialize)]
pub struct PartialGuild {
    /// Discord guild ID.
    pub id: GuildId,
}

/// Service for Discord OAuth2 authentication and identity lookups.
///
/// Provides methods for handling the Discord OAuth2 login flow and for resolving the
/// logged-in user's identity with their access token.
pub struct AuthService<'a> {
    /// HTTP client for Discord API requests.
    pub http_client: &'a reqwest::Client,
    /// OAuth2 client for Discord authentication flow.
    pub oauth_client: &'a OAuth2Client,
    /// Application configuration holding the API base URL and managed guild.
    pub config: &'a Config,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `http_client` - Reference to the HTTP client for Discord API requests
    /// - `oauth_client` - Reference to the configured OAuth2 client
    /// - `config` - Reference to the application configuration
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        config: &'a Config,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            config,
        }
    }

    /// Generates a Discord OAuth2 login URL with CSRF protection.
    ///
    /// Creates an authorization URL that redirects users to Discord's OAuth2 consent screen.
    /// Requests scopes for user identity, email, and guild list. Returns both the URL and
    /// CSRF token for callback validation.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Tuple containing the authorization URL and CSRF state token
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("guilds".to_string()))
            .url();

        (authorize_url, csrf_state)
    }

    /// Exchanges an OAuth2 authorization code for an access token.
    ///
    /// # Arguments
    /// - `authorization_code` - OAuth2 authorization code from Discord callback
    ///
    /// # Returns
    /// - `Ok(String)` - Access token for the user's session
    /// - `Err(AppError::AuthErr(TokenExchange))` - Discord rejected the code
    pub async fn callback(&self, authorization_code: String) -> Result<String, AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        tracing::debug!(
            "Exchanged authorization code for access token (expires in {:?})",
            token.expires_in()
        );

        Ok(token.access_token().secret().clone())
    }

    /// Resolves the user behind an access token and whether they are in the managed guild.
    ///
    /// # Arguments
    /// - `access_token` - OAuth2 access token from the session
    ///
    /// # Returns
    /// - `Ok(UserDto)` - User identity with guild membership flag
    /// - `Err(AppError::AuthErr(TokenRejected))` - Discord responded 401 to either lookup
    /// - `Err(AppError::ReqwestErr)` - HTTP request failed or response parsing failed
    pub async fn identity(&self, access_token: &str) -> Result<UserDto, AppError> {
        let user: DiscordUser = self.get_with_token(access_token, "users/@me").await?;
        let guilds: Vec<PartialGuild> = self.get_with_token(access_token, "users/@me/guilds").await?;

        let in_correct_guild = guilds.iter().any(|guild| guild.id == self.config.guild_id);

        Ok(UserDto {
            id: user.id.get(),
            username: user.name,
            avatar: user.avatar.map(|hash| hash.to_string()),
            discriminator: user.discriminator.map(|d| format!("{:04}", d.get())),
            in_correct_guild,
        })
    }

    /// Sends a bearer-authenticated GET to the Discord API and decodes the JSON body.
    ///
    /// # Arguments
    /// - `access_token` - OAuth2 access token
    /// - `path` - Path relative to the API base URL
    ///
    /// # Returns
    /// - `Ok(T)` - Decoded response body
    /// - `Err(AppError::AuthErr(TokenRejected))` - Discord responded 401
    /// - `Err(AppError::ReqwestErr)` - Any other transport or status failure
    async fn get_with_token<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http_client
            .get(format!("{}/{}", self.config.discord_api_url, path))
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AuthError::TokenRejected.into());
        }

        Ok(response.error_for_status()?.json::<T>().await?)
    }
}
