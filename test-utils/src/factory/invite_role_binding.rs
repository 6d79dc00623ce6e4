//! Invite role binding factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an invite role binding for the given guild, code and role.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Discord guild ID
/// - `code` - Invite code
/// - `role_id` - Discord role ID granted through the invite
///
/// # Returns
/// - `Ok(Model)` - The inserted binding
/// - `Err(DbErr)` - Database error during insert
pub async fn create_invite_role_binding(
    db: &DatabaseConnection,
    guild_id: u64,
    code: &str,
    role_id: u64,
) -> Result<entity::invite_role_binding::Model, DbErr> {
    entity::invite_role_binding::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        code: ActiveValue::Set(code.to_string()),
        role_id: ActiveValue::Set(role_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
