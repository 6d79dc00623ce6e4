use super::*;

/// Tests persisting a timeout restriction and reading it back.
///
/// Expected: Ok with identical fields
#[tokio::test]
async fn stores_timeout_restriction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Restriction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let restriction = timeout_restriction(1, 2, 30);

    let repo = RestrictionRepository::new(db);
    repo.replace(&restriction).await?;

    let stored = repo.find(key(1, 2)).await?.unwrap();
    assert_eq!(stored.mode, RestrictionMode::Timeout);
    assert_eq!(stored.reason, "spam");
    assert_eq!(stored.issued_by, UserId::new(99));
    assert_eq!(
        stored.unlock_at.map(|t| t.timestamp()),
        restriction.unlock_at.map(|t| t.timestamp())
    );

    Ok(())
}

/// Tests persisting an indefinite role swap restriction.
///
/// Expected: Ok with the role pair and no unlock time
#[tokio::test]
async fn stores_indefinite_role_swap() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Restriction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let restriction = Restriction {
        unlock_at: None,
        mode: RestrictionMode::RoleSwap {
            normal_role: RoleId::new(10),
            restricted_role: RoleId::new(20),
        },
        ..timeout_restriction(1, 2, 0)
    };

    let repo = RestrictionRepository::new(db);
    repo.replace(&restriction).await?;

    let stored = repo.find(key(1, 2)).await?.unwrap();
    assert!(stored.unlock_at.is_none());
    assert_eq!(stored.mode, restriction.mode);

    Ok(())
}

/// Tests that restricting an already restricted member replaces the record.
///
/// Expected: Ok with exactly one row carrying the newer values
#[tokio::test]
async fn replaces_existing_restriction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Restriction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::restriction::RestrictionFactory::new(db, 1, 2)
        .reason("first")
        .build()
        .await?;

    let replacement = Restriction {
        reason: "second".to_string(),
        ..timeout_restriction(1, 2, 60)
    };

    let repo = RestrictionRepository::new(db);
    repo.replace(&replacement).await?;

    let count = entity::prelude::Restriction::find().count(db).await?;
    assert_eq!(count, 1);
    assert_eq!(repo.find(key(1, 2)).await?.unwrap().reason, "second");

    Ok(())
}
