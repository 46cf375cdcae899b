use serenity::all::GuildId;
use std::time::Duration;

use crate::server::{error::config::ConfigError, model::role::RoleRules};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api";
const DISCORD_CDN_URL: &str = "https://cdn.discordapp.com";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_ROLE_APPLY_TIMEOUT_SECS: u64 = 10;

/// Immutable application configuration, built once at startup.
pub struct Config {
    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,
    pub discord_bot_token: String,

    /// The single guild whose roles members manage.
    pub guild_id: GuildId,

    pub bind_address: String,
    pub static_dir: String,

    /// Upper bound on each grant or revoke call during a save.
    pub role_apply_timeout: Duration,

    pub role_rules: RoleRules,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,
    pub discord_cdn_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup function.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable could not be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let guild_id = parse_guild_id(&required("DISCORD_GUILD_ID")?)?;

        let role_apply_timeout = match lookup("ROLE_APPLY_TIMEOUT_SECS") {
            Some(value) => parse_timeout_secs(&value)?,
            None => Duration::from_secs(DEFAULT_ROLE_APPLY_TIMEOUT_SECS),
        };

        Ok(Self {
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            guild_id,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            role_apply_timeout,
            role_rules: RoleRules::standard()?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            discord_cdn_url: DISCORD_CDN_URL.to_string(),
        })
    }
}

fn parse_guild_id(value: &str) -> Result<GuildId, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEnvVar {
        name: "DISCORD_GUILD_ID".to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match value.parse::<u64>() {
        Ok(0) => Err(invalid("guild ID must be non-zero")),
        Ok(id) => Ok(GuildId::new(id)),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

fn parse_timeout_secs(value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEnvVar {
        name: "ROLE_APPLY_TIMEOUT_SECS".to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match value.parse::<u64>() {
        Ok(0) => Err(invalid("timeout must be at least one second")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(&e.to_string())),
    }
}
