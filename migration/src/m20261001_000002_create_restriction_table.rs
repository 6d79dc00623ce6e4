use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restriction::Table)
                    .if_not_exists()
                    .col(string(Restriction::GuildId))
                    .col(string(Restriction::UserId))
                    .col(timestamp_with_time_zone_null(Restriction::UnlockAt))
                    .col(string(Restriction::Reason))
                    .col(string(Restriction::Mode))
                    .col(string_null(Restriction::NormalRoleId))
                    .col(string_null(Restriction::RestrictedRoleId))
                    .col(string(Restriction::IssuedBy))
                    .col(timestamp_with_time_zone(Restriction::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(Restriction::GuildId)
                            .col(Restriction::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restriction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Restriction {
    Table,
    GuildId,
    UserId,
    UnlockAt,
    Reason,
    Mode,
    NormalRoleId,
    RestrictedRoleId,
    IssuedBy,
    CreatedAt,
}
