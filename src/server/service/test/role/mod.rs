use serenity::all::{GuildId, RoleId, UserId};
use test_utils::builder::{TestBuilder, TEST_GUILD_ID};

use crate::server::{
    error::role::RoleError,
    model::role_change::{ApplyStatus, RoleChangeAction, RoleChangeRequest, RoleChangeStatus},
    service::{
        role::RoleService,
        test::{test_config, FakeGuildRoleApi, RecordedCall},
    },
};

mod apply;
mod fetch_and_classify;
mod get_member_roles;
mod save;

/// Guild roles used by most role service tests.
fn reference_roles() -> TestBuilder {
    TestBuilder::new().with_roles(&[(1, "He/Him"), (2, "Admin"), (3, "CS 220")])
}

fn request(to_add: &[u64], to_remove: &[u64]) -> RoleChangeRequest {
    RoleChangeRequest {
        user_id: UserId::new(11),
        to_add: to_add.iter().copied().map(RoleId::new).collect(),
        to_remove: to_remove.iter().copied().map(RoleId::new).collect(),
    }
}
