use super::*;

/// Tests removing a guild's configuration.
///
/// Expected: Ok(true) then Ok(false) on the second call
#[tokio::test]
async fn deletes_configuration_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VoiceMonitorConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_voice_monitor_config(db, 1, 100).await?;

    let repo = VoiceMonitorConfigRepository::new(db);
    assert!(repo.delete(GuildId::new(1)).await?);
    assert!(!repo.delete(GuildId::new(1)).await?);
    assert!(repo.find(GuildId::new(1)).await?.is_none());

    Ok(())
}
