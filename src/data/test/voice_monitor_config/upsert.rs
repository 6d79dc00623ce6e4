use super::*;

/// Tests storing a configuration with a log channel and reading it back.
///
/// Expected: Ok with thresholds converted back into durations
#[tokio::test]
async fn stores_configuration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VoiceMonitorConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let config = VoiceMonitorConfig {
        guild_id: GuildId::new(1),
        channel_id: ChannelId::new(100),
        warn_after: Duration::minutes(10),
        disconnect_after: Duration::minutes(15),
        log_channel_id: Some(ChannelId::new(200)),
        log_delete_after: Some(Duration::minutes(5)),
    };

    let repo = VoiceMonitorConfigRepository::new(db);
    repo.upsert(&config).await?;

    assert_eq!(repo.find(GuildId::new(1)).await?, Some(config));

    Ok(())
}

/// Tests that reconfiguring a guild replaces its channel and thresholds.
///
/// Expected: Ok with a single row holding the new values
#[tokio::test]
async fn replaces_configuration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VoiceMonitorConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_voice_monitor_config(db, 1, 100).await?;

    let repo = VoiceMonitorConfigRepository::new(db);
    repo.upsert(&VoiceMonitorConfig {
        guild_id: GuildId::new(1),
        channel_id: ChannelId::new(101),
        warn_after: Duration::minutes(20),
        disconnect_after: Duration::minutes(30),
        log_channel_id: None,
        log_delete_after: None,
    })
    .await?;

    let records = repo.get_all_records().await?;
    assert_eq!(records.len(), 1);

    let config = repo.find(GuildId::new(1)).await?.unwrap();
    assert_eq!(config.channel_id, ChannelId::new(101));
    assert_eq!(config.disconnect_after, Duration::minutes(30));

    Ok(())
}
