use super::*;

/// Tests removing an existing binding.
///
/// Expected: Ok(true) and the binding is gone
#[tokio::test]
async fn deletes_binding() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_invite_role_binding(db, 1, "abc", 10).await?;

    let repo = InviteRoleBindingRepository::new(db);
    assert!(repo.delete(GuildId::new(1), "abc").await?);
    assert!(repo.find(GuildId::new(1), "abc").await?.is_none());

    Ok(())
}

/// Tests removing a binding that does not exist.
///
/// Expected: Ok(false) and other bindings untouched
#[tokio::test]
async fn delete_missing_binding_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_invite_role_binding(db, 1, "abc", 10).await?;

    let repo = InviteRoleBindingRepository::new(db);
    assert!(!repo.delete(GuildId::new(1), "xyz").await?);

    let count = entity::prelude::InviteRoleBinding::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
