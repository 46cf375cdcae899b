use serenity::all::{Member, Role};

use crate::{
    context::TestContext,
    serenity::{create_test_member, create_test_role},
};

/// Guild ID used for every fixture built by `TestBuilder`.
pub const TEST_GUILD_ID: u64 = 696781447444299826;

/// Builder for creating test contexts with customizable guild state.
///
/// Provides a fluent interface for describing the roles and members a fake upstream
/// Discord API should expose. Roles keep the order in which they were added, mirroring
/// the order of Discord's list-roles response.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_role(1, "He/Him")
///     .with_role(3, "CS 220")
///     .with_member(42, &[3])
///     .build();
/// ```
pub struct TestBuilder {
    /// Roles to expose, in upstream order.
    roles: Vec<Role>,

    /// Members to expose.
    members: Vec<Member>,
}

impl TestBuilder {
    /// Creates a new test builder with no roles or members configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty guild state
    pub fn new() -> Self {
        Self {
            roles: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Adds a role to the guild.
    ///
    /// The role's position is derived from insertion order so that later roles sit
    /// higher in the hierarchy, and its color is left unset.
    ///
    /// # Arguments
    /// - `role_id` - Discord role ID (must be non-zero)
    /// - `name` - Role display name
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_role(mut self, role_id: u64, name: &str) -> Self {
        let position = self.roles.len() as u16;
        self.roles.push(create_test_role(role_id, name, 0, position));
        self
    }

    /// Adds several roles to the guild in the given order.
    ///
    /// # Arguments
    /// - `roles` - Slice of `(role_id, name)` pairs
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_roles(self, roles: &[(u64, &str)]) -> Self {
        roles
            .iter()
            .fold(self, |builder, (role_id, name)| builder.with_role(*role_id, name))
    }

    /// Adds a guild member holding the given roles.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID (must be non-zero)
    /// - `role_ids` - IDs of roles the member currently holds
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_member(mut self, user_id: u64, role_ids: &[u64]) -> Self {
        self.members
            .push(create_test_member(TEST_GUILD_ID, user_id, role_ids));
        self
    }

    /// Builds the test context with the configured guild state.
    ///
    /// # Returns
    /// - `TestContext` - Context holding the roles and members, with no session yet
    pub fn build(self) -> TestContext {
        TestContext::new(self.roles, self.members)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
