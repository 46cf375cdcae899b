use super::*;

/// Tests that a restricted role is stripped before anything is applied.
///
/// The member asks for Admin (2) and CS 220 (3); only CS 220 is granted.
///
/// Expected: Ok(Success) with exactly one grant call for role 3
#[tokio::test]
async fn strips_restricted_role() -> Result<(), RoleError> {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let outcome = RoleService::new(&api, &config)
        .save(request(&[2, 3], &[]))
        .await?;

    assert_eq!(outcome.status(), ApplyStatus::Success);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].role_id, RoleId::new(3));
    assert_eq!(
        api.calls(),
        vec![RecordedCall {
            action: RoleChangeAction::Grant,
            guild_id: GuildId::new(TEST_GUILD_ID),
            user_id: UserId::new(11),
            role_id: RoleId::new(3),
        }]
    );

    Ok(())
}

/// Tests a save that only touches restricted roles.
///
/// Expected: Err(RoleError::NoEffectiveChange) and no grant or revoke calls
#[tokio::test]
async fn rejects_only_restricted_roles() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let result = RoleService::new(&api, &config)
        .save(request(&[2], &[2]))
        .await;

    assert!(matches!(result, Err(RoleError::NoEffectiveChange)));
    assert!(api.calls().is_empty());
}

/// Tests a save with both lists empty.
///
/// Expected: Err(RoleError::NoEffectiveChange)
#[tokio::test]
async fn rejects_empty_request() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let result = RoleService::new(&api, &config).save(request(&[], &[])).await;

    assert!(matches!(result, Err(RoleError::NoEffectiveChange)));
    assert!(api.calls().is_empty());
}

/// Tests granting and revoking in the same save.
///
/// Expected: Ok(Success) with a grant for role 3 and a revoke for role 1
#[tokio::test]
async fn grants_and_revokes() -> Result<(), RoleError> {
    let test = reference_roles().with_member(11, &[1]).build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let outcome = RoleService::new(&api, &config)
        .save(request(&[3], &[1]))
        .await?;

    assert_eq!(outcome.status(), ApplyStatus::Success);

    let calls: Vec<(RoleChangeAction, u64)> = api
        .calls()
        .into_iter()
        .map(|call| (call.action, call.role_id.get()))
        .collect();

    assert_eq!(calls.len(), 2);
    assert!(calls.contains(&(RoleChangeAction::Grant, 3)));
    assert!(calls.contains(&(RoleChangeAction::Revoke, 1)));

    Ok(())
}

/// Tests that a failed grant is reported without hiding the successful ones.
///
/// Expected: Ok(Partial) with role 3 failed and role 1 applied
#[tokio::test]
async fn reports_partial_failure() -> Result<(), RoleError> {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test).failing_role(3);
    let config = test_config();

    let outcome = RoleService::new(&api, &config)
        .save(request(&[1, 3], &[]))
        .await?;

    assert_eq!(outcome.status(), ApplyStatus::Partial);
    assert_eq!(outcome.results[0].role_id, RoleId::new(1));
    assert!(outcome.results[0].is_applied());
    assert_eq!(outcome.results[1].role_id, RoleId::new(3));
    assert!(matches!(
        outcome.results[1].status,
        RoleChangeStatus::Failed(_)
    ));

    Ok(())
}

/// Tests that a failed role fetch aborts the save before any change is issued.
///
/// Expected: Err(RoleError::UpstreamUnavailable) and no grant or revoke calls
#[tokio::test]
async fn fails_when_roles_unavailable() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test).failing_fetch();
    let config = test_config();

    let result = RoleService::new(&api, &config)
        .save(request(&[3], &[]))
        .await;

    assert!(matches!(result, Err(RoleError::UpstreamUnavailable(_))));
    assert!(api.calls().is_empty());
}
