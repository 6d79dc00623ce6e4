//! Restriction role configuration factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates the normal/restricted role pair for a guild.
pub async fn create_restriction_role_config(
    db: &DatabaseConnection,
    guild_id: u64,
    normal_role_id: u64,
    restricted_role_id: u64,
) -> Result<entity::restriction_role_config::Model, DbErr> {
    entity::restriction_role_config::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        normal_role_id: ActiveValue::Set(normal_role_id.to_string()),
        restricted_role_id: ActiveValue::Set(restricted_role_id.to_string()),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
