use futures::future::join_all;
use serenity::all::{RoleId, UserId};

use crate::server::{
    config::Config,
    data::discord::GuildRoleApi,
    error::role::RoleError,
    model::{
        role::Classification,
        role_change::{
            ApplyOutcome, ApplyStatus, RoleChangeAction, RoleChangeRequest, RoleChangeResult,
            RoleChangeStatus, SanitizedRoleChange,
        },
    },
};

/// Service for classifying guild roles and applying member role changes.
///
/// Every call fetches the guild's roles afresh; classifications are never cached, so a
/// save is always sanitized against the roles as they exist at that moment.
pub struct RoleService<'a> {
    /// Bot-credentialed Discord client.
    api: &'a dyn GuildRoleApi,
    /// Guild, rule table, and apply timeout.
    config: &'a Config,
}

impl<'a> RoleService<'a> {
    /// Creates a new RoleService instance.
    ///
    /// # Arguments
    /// - `api` - Discord client used for every upstream call
    /// - `config` - Application configuration holding the guild ID and rule table
    ///
    /// # Returns
    /// - `RoleService` - New service instance
    pub fn new(api: &'a dyn GuildRoleApi, config: &'a Config) -> Self {
        Self { api, config }
    }

    /// Fetches the guild's roles and classifies them with the configured rule table.
    ///
    /// Issues exactly one list-roles call. An empty guild yields empty categories.
    ///
    /// # Returns
    /// - `Ok(Classification)` - Roles partitioned into categories, `restricted`, and `all`
    /// - `Err(RoleError::UpstreamUnavailable)` - The role list could not be fetched
    pub async fn fetch_and_classify(&self) -> Result<Classification, RoleError> {
        let roles = self.api.get_roles(self.config.guild_id).await?;

        tracing::debug!(
            "Fetched {} roles for guild {}",
            roles.len(),
            self.config.guild_id
        );

        Ok(self.config.role_rules.classify(roles))
    }

    /// Lists the roles a guild member currently holds.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the member
    ///
    /// # Returns
    /// - `Ok(Vec<RoleId>)` - Held role IDs
    /// - `Err(RoleError::UpstreamUnavailable)` - Member lookup failed
    pub async fn get_member_roles(&self, user_id: UserId) -> Result<Vec<RoleId>, RoleError> {
        let roles = self
            .api
            .get_member_roles(self.config.guild_id, user_id)
            .await?;

        Ok(roles)
    }

    /// Sanitizes a role change against freshly fetched roles, then applies it.
    ///
    /// # Arguments
    /// - `request` - Role changes submitted by the member
    ///
    /// # Returns
    /// - `Ok(ApplyOutcome)` - Per-role results; may contain failures
    /// - `Err(RoleError::UpstreamUnavailable)` - The role list could not be fetched
    /// - `Err(RoleError::NoEffectiveChange)` - Nothing left after removing restricted roles
    pub async fn save(&self, request: RoleChangeRequest) -> Result<ApplyOutcome, RoleError> {
        let classification = self.fetch_and_classify().await?;

        let change = request.sanitize(&classification)?;

        tracing::info!(
            "Applying {} grants and {} revokes for user {}",
            change.to_add().len(),
            change.to_remove().len(),
            change.user_id()
        );

        let outcome = self.apply(change).await;

        for failure in outcome.failures() {
            if let RoleChangeStatus::Failed(reason) = &failure.status {
                tracing::warn!(
                    "Failed to {:?} role {}: {}",
                    failure.action,
                    failure.role_id,
                    reason
                );
            }
        }

        if outcome.status() != ApplyStatus::Success {
            tracing::warn!(
                "Role save finished with status {:?} ({} of {} changes failed)",
                outcome.status(),
                outcome.failures().count(),
                outcome.results.len()
            );
        }

        Ok(outcome)
    }

    /// Issues every grant and revoke concurrently and waits for all of them.
    ///
    /// Each call is bounded by the configured timeout; a call that errors or times out is
    /// recorded as failed without affecting the others. Results are returned in issue
    /// order: grants first, then revokes.
    ///
    /// # Arguments
    /// - `change` - Sanitized role change
    ///
    /// # Returns
    /// - `ApplyOutcome` - One result per role change
    pub async fn apply(&self, change: SanitizedRoleChange) -> ApplyOutcome {
        let guild_id = self.config.guild_id;
        let user_id = change.user_id();
        let timeout = self.config.role_apply_timeout;

        let calls = change.changes().map(|(action, role_id)| async move {
            let call = async {
                match action {
                    RoleChangeAction::Grant => {
                        self.api.grant_role(guild_id, user_id, role_id).await
                    }
                    RoleChangeAction::Revoke => {
                        self.api.revoke_role(guild_id, user_id, role_id).await
                    }
                }
            };

            let status = match tokio::time::timeout(timeout, call).await {
                Ok(Ok(())) => RoleChangeStatus::Applied,
                Ok(Err(e)) => RoleChangeStatus::Failed(e.to_string()),
                Err(_) => RoleChangeStatus::Failed(format!(
                    "Timed out after {} seconds",
                    timeout.as_secs()
                )),
            };

            RoleChangeResult {
                role_id,
                action,
                status,
            }
        });

        ApplyOutcome::new(join_all(calls).await)
    }
}
