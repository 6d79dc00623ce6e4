use sea_orm::entity::prelude::*;

/// Occupancy tracking settings for a guild's monitored voice channel.
///
/// Thresholds and the log deletion delay are stored in seconds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "voice_monitor_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    pub channel_id: String,
    pub warn_after_secs: i64,
    pub disconnect_after_secs: i64,
    pub log_channel_id: Option<String>,
    pub log_delete_after_secs: Option<i64>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
