use super::*;

/// Tests looking up a code that has no binding.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unbound_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_invite_role_binding(db, 1, "abc", 10).await?;

    let repo = InviteRoleBindingRepository::new(db);
    assert!(repo.find(GuildId::new(1), "xyz").await?.is_none());

    Ok(())
}

/// Tests that a row with an unparseable role id surfaces as data corruption.
///
/// Expected: Err(AppError::DataCorruption)
#[tokio::test]
async fn reports_corrupt_role_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    entity::prelude::InviteRoleBinding::insert(entity::invite_role_binding::ActiveModel {
        guild_id: sea_orm::ActiveValue::Set("1".to_string()),
        code: sea_orm::ActiveValue::Set("abc".to_string()),
        role_id: sea_orm::ActiveValue::Set("moderators".to_string()),
        created_at: sea_orm::ActiveValue::Set(chrono::Utc::now()),
    })
    .exec_without_returning(db)
    .await?;

    let repo = InviteRoleBindingRepository::new(db);
    let result = repo.find(GuildId::new(1), "abc").await;

    assert!(matches!(result, Err(AppError::DataCorruption(_))));

    Ok(())
}

/// Tests listing bindings of a guild in code order.
///
/// Expected: Ok with bindings sorted by code
#[tokio::test]
async fn lists_guild_bindings_in_code_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_invite_role_binding(db, 1, "zeta", 10).await?;
    factory::create_invite_role_binding(db, 1, "alpha", 11).await?;
    factory::create_invite_role_binding(db, 2, "beta", 12).await?;

    let repo = InviteRoleBindingRepository::new(db);
    let codes: Vec<String> = repo
        .get_by_guild(GuildId::new(1))
        .await?
        .into_iter()
        .map(|binding| binding.code)
        .collect();

    assert_eq!(codes, vec!["alpha".to_string(), "zeta".to_string()]);

    Ok(())
}
