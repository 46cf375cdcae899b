use super::*;

/// Tests listing the roles a member holds.
///
/// Expected: Ok with roles [1, 3]
#[tokio::test]
async fn lists_member_roles() -> Result<(), RoleError> {
    let test = reference_roles().with_member(11, &[1, 3]).build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let roles = RoleService::new(&api, &config)
        .get_member_roles(UserId::new(11))
        .await?;

    assert_eq!(roles, vec![RoleId::new(1), RoleId::new(3)]);

    Ok(())
}

/// Tests looking up a user who is not in the guild.
///
/// Expected: Err(RoleError::UpstreamUnavailable)
#[tokio::test]
async fn fails_for_unknown_member() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let result = RoleService::new(&api, &config)
        .get_member_roles(UserId::new(99))
        .await;

    assert!(matches!(result, Err(RoleError::UpstreamUnavailable(_))));
}
