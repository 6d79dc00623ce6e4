use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InviteRoleBinding::Table)
                    .if_not_exists()
                    .col(string(InviteRoleBinding::GuildId))
                    .col(string(InviteRoleBinding::Code))
                    .col(string(InviteRoleBinding::RoleId))
                    .col(timestamp_with_time_zone(InviteRoleBinding::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(InviteRoleBinding::GuildId)
                            .col(InviteRoleBinding::Code),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InviteRoleBinding::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InviteRoleBinding {
    Table,
    GuildId,
    Code,
    RoleId,
    CreatedAt,
}
