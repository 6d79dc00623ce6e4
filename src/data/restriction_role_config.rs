use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};
use serenity::all::GuildId;

use crate::{error::AppError, model::restriction::RestrictionRoleConfig};

/// Repository for the normal/restricted role pair used by indefinite restrictions.
pub struct RestrictionRoleConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RestrictionRoleConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces the role pair for a guild.
    pub async fn upsert(&self, config: &RestrictionRoleConfig) -> Result<(), AppError> {
        entity::prelude::RestrictionRoleConfig::insert(
            entity::restriction_role_config::ActiveModel {
                guild_id: ActiveValue::Set(config.guild_id.get().to_string()),
                normal_role_id: ActiveValue::Set(config.normal_role.get().to_string()),
                restricted_role_id: ActiveValue::Set(config.restricted_role.get().to_string()),
                updated_at: ActiveValue::Set(Utc::now()),
            },
        )
        .on_conflict(
            OnConflict::column(entity::restriction_role_config::Column::GuildId)
                .update_columns([
                    entity::restriction_role_config::Column::NormalRoleId,
                    entity::restriction_role_config::Column::RestrictedRoleId,
                    entity::restriction_role_config::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    pub async fn find(&self, guild_id: GuildId) -> Result<Option<RestrictionRoleConfig>, AppError> {
        let entity = entity::prelude::RestrictionRoleConfig::find_by_id(guild_id.get().to_string())
            .one(self.db)
            .await?;

        entity.map(RestrictionRoleConfig::from_entity).transpose()
    }
}
