use super::*;

/// Tests creating a new invite binding.
///
/// Expected: Ok with the binding readable through `find`
#[tokio::test]
async fn creates_binding() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteRoleBindingRepository::new(db);
    repo.upsert(GuildId::new(1), "abc", RoleId::new(10)).await?;

    let binding = repo.find(GuildId::new(1), "abc").await?.unwrap();
    assert_eq!(binding.role_id, RoleId::new(10));
    assert_eq!(binding.code, "abc");

    Ok(())
}

/// Tests that binding an already bound code replaces its role.
///
/// Expected: Ok with a single row carrying the new role
#[tokio::test]
async fn replaces_existing_binding() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_invite_role_binding(db, 1, "abc", 10).await?;

    let repo = InviteRoleBindingRepository::new(db);
    repo.upsert(GuildId::new(1), "abc", RoleId::new(20)).await?;

    let count = entity::prelude::InviteRoleBinding::find().count(db).await?;
    assert_eq!(count, 1);

    let binding = repo.find(GuildId::new(1), "abc").await?.unwrap();
    assert_eq!(binding.role_id, RoleId::new(20));

    Ok(())
}

/// Tests that the same code in two guilds yields two independent bindings.
///
/// Expected: Ok with one binding per guild
#[tokio::test]
async fn keeps_guilds_separate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteRoleBinding)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteRoleBindingRepository::new(db);
    repo.upsert(GuildId::new(1), "abc", RoleId::new(10)).await?;
    repo.upsert(GuildId::new(2), "abc", RoleId::new(20)).await?;

    assert_eq!(repo.get_by_guild(GuildId::new(1)).await?.len(), 1);
    assert_eq!(
        repo.find(GuildId::new(2), "abc").await?.unwrap().role_id,
        RoleId::new(20)
    );

    Ok(())
}
