//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Immutable configuration (guild, rule table, apply timeout)
//! - HTTP client for user-credentialed Discord API requests
//! - OAuth2 client for Discord authentication
//! - Bot-credentialed Discord client for role operations

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use std::sync::Arc;

use crate::server::{config::Config, data::discord::GuildRoleApi};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `Arc<Config>` and `Arc<dyn GuildRoleApi>` are reference-counted pointers
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded once at startup and never mutated.
    pub config: Arc<Config>,

    /// HTTP client for making external API requests.
    ///
    /// Configured with no redirects to prevent SSRF vulnerabilities. Used for the
    /// OAuth2 token exchange and user-credentialed Discord calls.
    pub http_client: reqwest::Client,

    /// OAuth2 client for Discord authentication flow.
    pub oauth_client: OAuth2Client,

    /// Bot-credentialed Discord client used to list roles and grant or revoke them.
    pub discord: Arc<dyn GuildRoleApi>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `http_client` - HTTP client for external API requests
    /// - `oauth_client` - OAuth2 client for Discord authentication
    /// - `discord` - Discord client for role operations
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        config: Arc<Config>,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord: Arc<dyn GuildRoleApi>,
    ) -> Self {
        Self {
            config,
            http_client,
            oauth_client,
            discord,
        }
    }
}
