use super::*;

/// Tests deleting an active restriction.
///
/// Expected: Ok(true) and the record is gone
#[tokio::test]
async fn deletes_restriction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Restriction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_restriction(db, 1, 2).await?;

    let repo = RestrictionRepository::new(db);
    assert!(repo.delete(key(1, 2)).await?);
    assert!(repo.find(key(1, 2)).await?.is_none());

    Ok(())
}

/// Tests that deleting twice only removes once.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn second_delete_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Restriction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_restriction(db, 1, 2).await?;

    let repo = RestrictionRepository::new(db);
    assert!(repo.delete(key(1, 2)).await?);
    assert!(!repo.delete(key(1, 2)).await?);

    Ok(())
}

/// Tests that deleting one member's restriction leaves others alone.
///
/// Expected: Ok with the same member in another guild still restricted
#[tokio::test]
async fn only_deletes_matching_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Restriction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_restriction(db, 1, 2).await?;
    factory::create_restriction(db, 3, 2).await?;

    let repo = RestrictionRepository::new(db);
    repo.delete(key(1, 2)).await?;

    assert!(repo.find(key(3, 2)).await?.is_some());

    Ok(())
}
