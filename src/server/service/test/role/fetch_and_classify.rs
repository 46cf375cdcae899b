use super::*;

/// Tests classifying the reference guild.
///
/// Verifies that pronoun and course roles land in their categories and that the admin
/// role is restricted but still listed under `all`.
///
/// Expected: Ok with identity=[1], cs_courses=[3], restricted=[2], all=[1, 2, 3]
#[tokio::test]
async fn classifies_reference_roles() -> Result<(), RoleError> {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let classification = RoleService::new(&api, &config).fetch_and_classify().await?;

    let ids = |category: &str| -> Vec<u64> {
        classification
            .get(category)
            .unwrap()
            .iter()
            .map(|role| role.id.get())
            .collect()
    };

    assert_eq!(ids("identity"), vec![1]);
    assert_eq!(ids("cs_courses"), vec![3]);
    assert_eq!(ids("restricted"), vec![2]);
    assert_eq!(ids("all"), vec![1, 2, 3]);
    assert!(ids("hobbies").is_empty());
    assert_eq!(api.fetch_count(), 1);

    Ok(())
}

/// Tests classifying a guild with no roles.
///
/// Expected: Ok with every category present and empty
#[tokio::test]
async fn classifies_empty_guild() -> Result<(), RoleError> {
    let test = TestBuilder::new().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();

    let classification = RoleService::new(&api, &config).fetch_and_classify().await?;

    assert_eq!(classification.categories.len(), 8);
    assert!(classification
        .categories
        .iter()
        .all(|(_, roles)| roles.is_empty()));
    assert!(classification.restricted.is_empty());
    assert!(classification.all.is_empty());

    Ok(())
}

/// Tests that a failed role fetch is surfaced as upstream unavailability.
///
/// Expected: Err(RoleError::UpstreamUnavailable)
#[tokio::test]
async fn fails_when_upstream_unavailable() {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test).failing_fetch();
    let config = test_config();

    let result = RoleService::new(&api, &config).fetch_and_classify().await;

    assert!(matches!(result, Err(RoleError::UpstreamUnavailable(_))));
}

/// Tests that roles are fetched afresh on every call.
///
/// Expected: two calls issue two role list requests
#[tokio::test]
async fn does_not_cache_roles() -> Result<(), RoleError> {
    let test = reference_roles().build();
    let api = FakeGuildRoleApi::new(&test);
    let config = test_config();
    let service = RoleService::new(&api, &config);

    service.fetch_and_classify().await?;
    service.fetch_and_classify().await?;

    assert_eq!(api.fetch_count(), 2);

    Ok(())
}
