//! Invite role binding repository.
//!
//! Bindings map an invite code to the role granted to members who join through it.
//! They are created by administrators and never expire on their own.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serenity::all::{GuildId, RoleId};

use crate::{error::AppError, model::invite::InviteRoleBinding};

pub struct InviteRoleBindingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InviteRoleBindingRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection for executing queries
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Binds an invite code to a role, replacing any existing binding for the code.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `code` - Invite code
    /// - `role_id` - Role granted to members who join through the invite
    ///
    /// # Returns
    /// - `Ok(())` - Binding stored
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn upsert(
        &self,
        guild_id: GuildId,
        code: &str,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        entity::prelude::InviteRoleBinding::insert(entity::invite_role_binding::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.get().to_string()),
            code: ActiveValue::Set(code.to_string()),
            role_id: ActiveValue::Set(role_id.get().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::invite_role_binding::Column::GuildId,
                entity::invite_role_binding::Column::Code,
            ])
            .update_columns([
                entity::invite_role_binding::Column::RoleId,
                entity::invite_role_binding::Column::CreatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Finds the binding for an invite code.
    ///
    /// # Returns
    /// - `Ok(Some(InviteRoleBinding))` - Binding found
    /// - `Ok(None)` - The code is not bound to any role
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn find(
        &self,
        guild_id: GuildId,
        code: &str,
    ) -> Result<Option<InviteRoleBinding>, AppError> {
        let entity = entity::prelude::InviteRoleBinding::find_by_id((
            guild_id.get().to_string(),
            code.to_string(),
        ))
        .one(self.db)
        .await?;

        entity.map(InviteRoleBinding::from_entity).transpose()
    }

    /// Gets every binding of a guild ordered by code.
    pub async fn get_by_guild(
        &self,
        guild_id: GuildId,
    ) -> Result<Vec<InviteRoleBinding>, AppError> {
        entity::prelude::InviteRoleBinding::find()
            .filter(entity::invite_role_binding::Column::GuildId.eq(guild_id.get().to_string()))
            .order_by_asc(entity::invite_role_binding::Column::Code)
            .all(self.db)
            .await?
            .into_iter()
            .map(InviteRoleBinding::from_entity)
            .collect()
    }

    /// Removes the binding for an invite code.
    ///
    /// # Returns
    /// - `Ok(true)` - A binding was removed
    /// - `Ok(false)` - The code was not bound
    /// - `Err(AppError::DbErr)` - Database error during deletion
    pub async fn delete(&self, guild_id: GuildId, code: &str) -> Result<bool, AppError> {
        let result = entity::prelude::InviteRoleBinding::delete_many()
            .filter(entity::invite_role_binding::Column::GuildId.eq(guild_id.get().to_string()))
            .filter(entity::invite_role_binding::Column::Code.eq(code))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
