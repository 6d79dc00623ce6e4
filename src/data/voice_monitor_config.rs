//! Voice monitor configuration repository.
//!
//! One row per guild describing the monitored voice channel, its warning and
//! disconnect thresholds and the optional log channel.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};
use serenity::all::GuildId;

use crate::{error::AppError, model::voice::VoiceMonitorConfig};

pub struct VoiceMonitorConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoiceMonitorConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces the monitor configuration of a guild.
    ///
    /// # Arguments
    /// - `config` - Validated configuration to store
    ///
    /// # Returns
    /// - `Ok(())` - Configuration stored
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn upsert(&self, config: &VoiceMonitorConfig) -> Result<(), AppError> {
        entity::prelude::VoiceMonitorConfig::insert(entity::voice_monitor_config::ActiveModel {
            guild_id: ActiveValue::Set(config.guild_id.get().to_string()),
            channel_id: ActiveValue::Set(config.channel_id.get().to_string()),
            warn_after_secs: ActiveValue::Set(config.warn_after.num_seconds()),
            disconnect_after_secs: ActiveValue::Set(config.disconnect_after.num_seconds()),
            log_channel_id: ActiveValue::Set(config.log_channel_id.map(|id| id.get().to_string())),
            log_delete_after_secs: ActiveValue::Set(
                config.log_delete_after.map(|delay| delay.num_seconds()),
            ),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::voice_monitor_config::Column::GuildId)
                .update_columns([
                    entity::voice_monitor_config::Column::ChannelId,
                    entity::voice_monitor_config::Column::WarnAfterSecs,
                    entity::voice_monitor_config::Column::DisconnectAfterSecs,
                    entity::voice_monitor_config::Column::LogChannelId,
                    entity::voice_monitor_config::Column::LogDeleteAfterSecs,
                    entity::voice_monitor_config::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Finds the monitor configuration of a guild.
    ///
    /// # Returns
    /// - `Ok(Some(VoiceMonitorConfig))` - The guild has a monitored channel
    /// - `Ok(None)` - Voice monitoring is not configured for the guild
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn find(&self, guild_id: GuildId) -> Result<Option<VoiceMonitorConfig>, AppError> {
        let entity = entity::prelude::VoiceMonitorConfig::find_by_id(guild_id.get().to_string())
            .one(self.db)
            .await?;

        entity.map(VoiceMonitorConfig::from_entity).transpose()
    }

    /// Gets every configuration row without converting it.
    pub async fn get_all_records(&self) -> Result<Vec<entity::voice_monitor_config::Model>, DbErr> {
        entity::prelude::VoiceMonitorConfig::find().all(self.db).await
    }

    /// Removes the monitor configuration of a guild.
    ///
    /// # Returns
    /// - `Ok(true)` - Configuration removed
    /// - `Ok(false)` - The guild had no configuration
    pub async fn delete(&self, guild_id: GuildId) -> Result<bool, AppError> {
        let result = entity::prelude::VoiceMonitorConfig::delete_by_id(guild_id.get().to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
