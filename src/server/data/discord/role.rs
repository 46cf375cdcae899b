//! Bot-credentialed access to a guild's roles and member role assignments.
//!
//! `GuildRoleApi` is the seam between the role service and Discord's REST API. The live
//! implementation is Serenity's `Http` client authenticated with the bot token; tests
//! substitute an in-memory fake.

use serenity::{
    all::{GuildId, RoleId, UserId},
    async_trait,
    http::Http,
};

use crate::server::model::role::Role;

/// Audit log reason attached to grants and revokes made on a member's behalf.
const AUDIT_LOG_REASON: &str = "Self-service role change";

/// Guild role operations requiring bot-level credentials.
#[async_trait]
pub trait GuildRoleApi: Send + Sync {
    /// Lists every role in the guild, in upstream order, in a single request.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Vec<Role>)` - Roles projected to the domain model
    /// - `Err(serenity::Error)` - Transport failure or error status from Discord
    async fn get_roles(&self, guild_id: GuildId) -> Result<Vec<Role>, serenity::Error>;

    /// Lists the IDs of the roles a guild member currently holds.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID of the member
    ///
    /// # Returns
    /// - `Ok(Vec<RoleId>)` - Held role IDs
    /// - `Err(serenity::Error)` - Member unknown, transport failure, or error status
    async fn get_member_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<RoleId>, serenity::Error>;

    /// Adds a role to a member. Granting an already held role succeeds.
    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error>;

    /// Removes a role from a member. Revoking a role the member lacks succeeds.
    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error>;
}

#[async_trait]
impl GuildRoleApi for Http {
    async fn get_roles(&self, guild_id: GuildId) -> Result<Vec<Role>, serenity::Error> {
        let roles = self.get_guild_roles(guild_id).await?;

        Ok(roles.iter().map(Role::from_serenity).collect())
    }

    async fn get_member_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<RoleId>, serenity::Error> {
        let member = self.get_member(guild_id, user_id).await?;

        Ok(member.roles)
    }

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.add_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await
    }

    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.remove_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await
    }
}
