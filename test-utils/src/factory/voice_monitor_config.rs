//! Voice monitor configuration factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for monitored voice channel settings.
///
/// Defaults to a 10 minute warning, 15 minute disconnect and no log channel.
pub struct VoiceMonitorConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
    warn_after_secs: i64,
    disconnect_after_secs: i64,
    log_channel_id: Option<u64>,
    log_delete_after_secs: Option<i64>,
}

impl<'a> VoiceMonitorConfigFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: u64, channel_id: u64) -> Self {
        Self {
            db,
            guild_id,
            channel_id,
            warn_after_secs: 600,
            disconnect_after_secs: 900,
            log_channel_id: None,
            log_delete_after_secs: None,
        }
    }

    pub fn thresholds(mut self, warn_after_secs: i64, disconnect_after_secs: i64) -> Self {
        self.warn_after_secs = warn_after_secs;
        self.disconnect_after_secs = disconnect_after_secs;
        self
    }

    pub fn log_channel(mut self, log_channel_id: u64, delete_after_secs: Option<i64>) -> Self {
        self.log_channel_id = Some(log_channel_id);
        self.log_delete_after_secs = delete_after_secs;
        self
    }

    pub async fn build(self) -> Result<entity::voice_monitor_config::Model, DbErr> {
        entity::voice_monitor_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            warn_after_secs: ActiveValue::Set(self.warn_after_secs),
            disconnect_after_secs: ActiveValue::Set(self.disconnect_after_secs),
            log_channel_id: ActiveValue::Set(self.log_channel_id.map(|id| id.to_string())),
            log_delete_after_secs: ActiveValue::Set(self.log_delete_after_secs),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a voice monitor configuration with default thresholds.
pub async fn create_voice_monitor_config(
    db: &DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
) -> Result<entity::voice_monitor_config::Model, DbErr> {
    VoiceMonitorConfigFactory::new(db, guild_id, channel_id)
        .build()
        .await
}
