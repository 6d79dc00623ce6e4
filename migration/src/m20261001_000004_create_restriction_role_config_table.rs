use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestrictionRoleConfig::Table)
                    .if_not_exists()
                    .col(string(RestrictionRoleConfig::GuildId).primary_key())
                    .col(string(RestrictionRoleConfig::NormalRoleId))
                    .col(string(RestrictionRoleConfig::RestrictedRoleId))
                    .col(timestamp_with_time_zone(RestrictionRoleConfig::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestrictionRoleConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RestrictionRoleConfig {
    Table,
    GuildId,
    NormalRoleId,
    RestrictedRoleId,
    UpdatedAt,
}
