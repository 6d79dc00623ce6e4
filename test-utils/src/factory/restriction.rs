//! Restriction factory for creating test restriction entities.
//!
//! Raw column setters (`mode`, `user_id_raw`) are provided so tests can insert rows
//! that the repository cannot parse.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test restrictions with customizable fields.
///
/// Defaults to a 30 minute timeout issued by a generated moderator id.
///
/// # Example
///
/// ```rust,ignore
/// let restriction = RestrictionFactory::new(&db, 1, 2)
///     .unlock_at(Some(Utc::now() - Duration::minutes(1)))
///     .build()
///     .await?;
/// ```
pub struct RestrictionFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    unlock_at: Option<DateTime<Utc>>,
    reason: String,
    mode: String,
    normal_role_id: Option<String>,
    restricted_role_id: Option<String>,
    issued_by: String,
}

impl<'a> RestrictionFactory<'a> {
    /// Creates a new factory for the given guild and member.
    ///
    /// Defaults:
    /// - unlock_at: 30 minutes from now
    /// - reason: `"Test restriction"`
    /// - mode: `"timeout"`
    /// - issued_by: auto-incremented id
    pub fn new(db: &'a DatabaseConnection, guild_id: u64, user_id: u64) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
            unlock_at: Some(Utc::now() + Duration::minutes(30)),
            reason: "Test restriction".to_string(),
            mode: "timeout".to_string(),
            normal_role_id: None,
            restricted_role_id: None,
            issued_by: next_id().to_string(),
        }
    }

    pub fn unlock_at(mut self, unlock_at: Option<DateTime<Utc>>) -> Self {
        self.unlock_at = unlock_at;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Switches the restriction to role swap mode with the given role pair.
    pub fn role_swap(mut self, normal_role_id: u64, restricted_role_id: u64) -> Self {
        self.mode = "role_swap".to_string();
        self.normal_role_id = Some(normal_role_id.to_string());
        self.restricted_role_id = Some(restricted_role_id.to_string());
        self
    }

    /// Overrides the raw mode column.
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Overrides the raw user id column.
    pub fn user_id_raw(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Inserts the restriction into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted restriction
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::restriction::Model, DbErr> {
        entity::restriction::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            unlock_at: ActiveValue::Set(self.unlock_at),
            reason: ActiveValue::Set(self.reason),
            mode: ActiveValue::Set(self.mode),
            normal_role_id: ActiveValue::Set(self.normal_role_id),
            restricted_role_id: ActiveValue::Set(self.restricted_role_id),
            issued_by: ActiveValue::Set(self.issued_by),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default 30 minute timeout restriction.
pub async fn create_restriction(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
) -> Result<entity::restriction::Model, DbErr> {
    RestrictionFactory::new(db, guild_id, user_id).build().await
}
