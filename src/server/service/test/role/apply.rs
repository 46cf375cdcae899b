use super::*;

use crate::server::model::role::Classification;

async fn sanitized(
    api: &FakeGuildRoleApi,
    to_add: &[u64],
    to_remove: &[u64],
) -> crate::server::model::role_change::SanitizedRoleChange {
    let config = test_config();
    let classification: Classification = RoleService::new(api, &config)
        .fetch_and_classify()
        .await
        .unwrap();

    request(to_add, to_remove).sanitize(&classification).unwrap()
}

/// Tests that a stalled call is cut off by the apply timeout.
///
/// Time is paused, so the hour-long stall resolves as soon as the five second timeout
/// elapses.
///
/// Expected: role 3 failed with a timeout message, role 1 applied, status Partial
#[tokio::test(start_paused = true)]
async fn times_out_stalled_call() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test).stalled_role(3);
    let config = test_config();
    let change = sanitized(&api, &[1, 3], &[]).await;

    let outcome = RoleService::new(&api, &config).apply(change).await;

    assert_eq!(outcome.status(), ApplyStatus::Partial);
    assert!(outcome.results[0].is_applied());
    assert_eq!(
        outcome.results[1].status,
        RoleChangeStatus::Failed("Timed out after 5 seconds".to_string())
    );
}

/// Tests that every change is attempted even when all of them fail.
///
/// Expected: status Failed with one recorded call per change
#[tokio::test]
async fn attempts_every_change() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test).failing_role(1).failing_role(3);
    let config = test_config();
    let change = sanitized(&api, &[3], &[1]).await;

    let outcome = RoleService::new(&api, &config).apply(change).await;

    assert_eq!(outcome.status(), ApplyStatus::Failed);
    assert_eq!(outcome.failures().count(), 2);
    assert_eq!(api.calls().len(), 2);
}

/// Tests that results are reported grants first, then revokes.
///
/// Expected: results ordered [grant 3, revoke 1]
#[tokio::test]
async fn orders_results_grants_first() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();
    let change = sanitized(&api, &[3], &[1]).await;

    let outcome = RoleService::new(&api, &config).apply(change).await;

    let order: Vec<(RoleChangeAction, u64)> = outcome
        .results
        .iter()
        .map(|result| (result.action, result.role_id.get()))
        .collect();

    assert_eq!(
        order,
        vec![(RoleChangeAction::Grant, 3), (RoleChangeAction::Revoke, 1)]
    );
    assert_eq!(outcome.status(), ApplyStatus::Success);
}

/// Tests that a duplicated role ID produces one call per occurrence.
///
/// Expected: two grant calls for role 3
#[tokio::test]
async fn keeps_duplicate_changes() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();
    let change = sanitized(&api, &[3, 3], &[]).await;

    let outcome = RoleService::new(&api, &config).apply(change).await;

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(api.calls().len(), 2);
}
