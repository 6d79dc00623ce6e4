//! Restriction repository.
//!
//! Stores at most one restriction per guild member; the composite primary key
//! `(guild_id, user_id)` enforces it. Records are replaced, never patched, and are
//! reloaded at startup so downtime does not extend an enforcement window.

use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::{
    error::AppError,
    model::{
        key::MemberKey,
        restriction::{Restriction, RestrictionMode},
    },
};

pub struct RestrictionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RestrictionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a restriction, replacing any existing one for the same member.
    ///
    /// # Arguments
    /// - `restriction` - The restriction to persist
    ///
    /// # Returns
    /// - `Ok(())` - Restriction stored
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn replace(&self, restriction: &Restriction) -> Result<(), AppError> {
        let (normal_role_id, restricted_role_id) = match restriction.mode {
            RestrictionMode::Timeout => (None, None),
            RestrictionMode::RoleSwap {
                normal_role,
                restricted_role,
            } => (
                Some(normal_role.get().to_string()),
                Some(restricted_role.get().to_string()),
            ),
        };

        entity::prelude::Restriction::insert(entity::restriction::ActiveModel {
            guild_id: ActiveValue::Set(restriction.key.guild_id.get().to_string()),
            user_id: ActiveValue::Set(restriction.key.user_id.get().to_string()),
            unlock_at: ActiveValue::Set(restriction.unlock_at),
            reason: ActiveValue::Set(restriction.reason.clone()),
            mode: ActiveValue::Set(restriction.mode.as_str().to_string()),
            normal_role_id: ActiveValue::Set(normal_role_id),
            restricted_role_id: ActiveValue::Set(restricted_role_id),
            issued_by: ActiveValue::Set(restriction.issued_by.get().to_string()),
            created_at: ActiveValue::Set(restriction.created_at),
        })
        .on_conflict(
            OnConflict::columns([
                entity::restriction::Column::GuildId,
                entity::restriction::Column::UserId,
            ])
            .update_columns([
                entity::restriction::Column::UnlockAt,
                entity::restriction::Column::Reason,
                entity::restriction::Column::Mode,
                entity::restriction::Column::NormalRoleId,
                entity::restriction::Column::RestrictedRoleId,
                entity::restriction::Column::IssuedBy,
                entity::restriction::Column::CreatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Finds the active restriction of a member.
    ///
    /// # Returns
    /// - `Ok(Some(Restriction))` - The member is restricted
    /// - `Ok(None)` - No restriction exists
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn find(&self, key: MemberKey) -> Result<Option<Restriction>, AppError> {
        let entity = entity::prelude::Restriction::find_by_id((
            key.guild_id.get().to_string(),
            key.user_id.get().to_string(),
        ))
        .one(self.db)
        .await?;

        entity.map(Restriction::from_entity).transpose()
    }

    /// Gets every stored restriction row without converting it.
    ///
    /// Conversion is left to the caller so one unreadable row can be attributed to its
    /// guild instead of failing the whole load.
    pub async fn get_all_records(&self) -> Result<Vec<entity::restriction::Model>, DbErr> {
        entity::prelude::Restriction::find().all(self.db).await
    }

    /// Deletes the restriction of a member.
    ///
    /// # Returns
    /// - `Ok(true)` - A restriction was removed
    /// - `Ok(false)` - No restriction existed
    /// - `Err(AppError::DbErr)` - Database error during deletion
    pub async fn delete(&self, key: MemberKey) -> Result<bool, AppError> {
        let result = entity::prelude::Restriction::delete_many()
            .filter(entity::restriction::Column::GuildId.eq(key.guild_id.get().to_string()))
            .filter(entity::restriction::Column::UserId.eq(key.user_id.get().to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
