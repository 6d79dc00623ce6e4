use super::*;

/// Tests loading every stored restriction row, including unreadable ones.
///
/// Expected: Ok with all rows returned unconverted
#[tokio::test]
async fn returns_every_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Restriction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_restriction(db, 1, 2).await?;
    factory::restriction::RestrictionFactory::new(db, 1, 3)
        .unlock_at(None)
        .role_swap(10, 20)
        .build()
        .await?;
    factory::restriction::RestrictionFactory::new(db, 4, 5)
        .mode("exile")
        .build()
        .await?;

    let repo = RestrictionRepository::new(db);
    let records = repo.get_all_records().await?;

    assert_eq!(records.len(), 3);
    assert!(records.iter().any(|record| record.mode == "exile"));

    Ok(())
}
