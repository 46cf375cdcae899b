//! Shared fixtures for service tests.
//!
//! `FakeGuildRoleApi` stands in for Discord: it serves the roles and members of a
//! `TestContext`, records every grant and revoke, and can be told to fail or stall.

use serenity::{
    all::{GuildId, Member, RoleId, UserId},
    async_trait,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_utils::{builder::TEST_GUILD_ID, context::TestContext};

use crate::server::{
    config::Config,
    startup::{setup_oauth_client, setup_reqwest_client},
    state::AppState,
    data::discord::GuildRoleApi,
    model::{role::Role, role::RoleRules, role_change::RoleChangeAction},
};

mod role;

/// Builds a configuration pointing at the test guild with the standard rule table.
pub fn test_config() -> Config {
    Config {
        discord_client_id: "742765861013553272".to_string(),
        discord_client_secret: "client-secret".to_string(),
        discord_redirect_url: "http://localhost:8000/auth".to_string(),
        discord_bot_token: "bot-token".to_string(),
        guild_id: GuildId::new(TEST_GUILD_ID),
        bind_address: "127.0.0.1:0".to_string(),
        static_dir: "static".to_string(),
        role_apply_timeout: Duration::from_secs(5),
        role_rules: RoleRules::standard().unwrap(),
        discord_auth_url: "https://discord.com/oauth2/authorize".to_string(),
        discord_token_url: "https://discord.com/api/oauth2/token".to_string(),
        discord_api_url: "https://discord.com/api".to_string(),
        discord_cdn_url: "https://cdn.discordapp.com".to_string(),
    }
}

/// Builds application state backed by the given fake upstream.
pub fn test_state(api: Arc<FakeGuildRoleApi>) -> AppState {
    let config = test_config();
    let oauth_client = setup_oauth_client(&config).unwrap();
    let http_client = setup_reqwest_client().unwrap();

    AppState::new(Arc::new(config), http_client, oauth_client, api)
}

/// A grant or revoke observed by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub action: RoleChangeAction,
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub role_id: RoleId,
}

/// In-memory stand-in for Discord's guild role endpoints.
pub struct FakeGuildRoleApi {
    roles: Vec<serenity::all::Role>,
    members: Vec<Member>,
    fail_fetch: bool,
    failing_roles: HashSet<RoleId>,
    stalled_roles: HashSet<RoleId>,
    calls: Mutex<Vec<RecordedCall>>,
    fetches: AtomicUsize,
}

impl FakeGuildRoleApi {
    pub fn new(test: &TestContext) -> Self {
        Self {
            roles: test.roles.clone(),
            members: test.members.clone(),
            fail_fetch: false,
            failing_roles: HashSet::new(),
            stalled_roles: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Makes every role list request fail.
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Makes grants and revokes of this role fail.
    pub fn failing_role(mut self, role_id: u64) -> Self {
        self.failing_roles.insert(RoleId::new(role_id));
        self
    }

    /// Makes grants and revokes of this role hang for an hour.
    pub fn stalled_role(mut self, role_id: u64) -> Self {
        self.stalled_roles.insert(RoleId::new(role_id));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    async fn change(
        &self,
        action: RoleChangeAction,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            action,
            guild_id,
            user_id,
            role_id,
        });

        if self.stalled_roles.contains(&role_id) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        if self.failing_roles.contains(&role_id) {
            return Err(serenity::Error::Other("connection reset by peer"));
        }

        Ok(())
    }
}

#[async_trait]
impl GuildRoleApi for FakeGuildRoleApi {
    async fn get_roles(&self, _guild_id: GuildId) -> Result<Vec<Role>, serenity::Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.fail_fetch {
            return Err(serenity::Error::Other("connection refused"));
        }

        Ok(self.roles.iter().map(Role::from_serenity).collect())
    }

    async fn get_member_roles(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<RoleId>, serenity::Error> {
        self.members
            .iter()
            .find(|member| member.user.id == user_id)
            .map(|member| member.roles.clone())
            .ok_or(serenity::Error::Other("Unknown Member"))
    }

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.change(RoleChangeAction::Grant, guild_id, user_id, role_id)
            .await
    }

    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.change(RoleChangeAction::Revoke, guild_id, user_id, role_id)
            .await
    }
}
