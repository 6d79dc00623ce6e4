use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VoiceMonitorConfig::Table)
                    .if_not_exists()
                    .col(string(VoiceMonitorConfig::GuildId).primary_key())
                    .col(string(VoiceMonitorConfig::ChannelId))
                    .col(big_integer(VoiceMonitorConfig::WarnAfterSecs))
                    .col(big_integer(VoiceMonitorConfig::DisconnectAfterSecs))
                    .col(string_null(VoiceMonitorConfig::LogChannelId))
                    .col(big_integer_null(VoiceMonitorConfig::LogDeleteAfterSecs))
                    .col(timestamp_with_time_zone(VoiceMonitorConfig::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VoiceMonitorConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VoiceMonitorConfig {
    Table,
    GuildId,
    ChannelId,
    WarnAfterSecs,
    DisconnectAfterSecs,
    LogChannelId,
    LogDeleteAfterSecs,
    UpdatedAt,
}
