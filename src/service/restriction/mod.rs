//! Restriction (mute) scheduling and enforcement.
//!
//! This module provides the `RestrictionService` for applying, enforcing and lifting
//! member restrictions. A bounded restriction uses Discord's native communication
//! timeout; an indefinite one swaps the guild's normal role for its restricted role.
//! Every restriction is persisted and mirrored in the in-memory `RestrictionRegistry`,
//! which the message and voice handlers consult on every event.
//!
//! The service is organized into separate modules by concern:
//! - `apply` - Applying and replacing restrictions
//! - `lift` - Lifting restrictions and reversing their enforcement
//! - `enforce` - Blocking messages and voice joins of restricted members
//! - `tick` - Periodic lifting of due restrictions and startup reload
//! - `text` - Member-facing notice texts

pub mod apply;
pub mod enforce;
pub mod lift;
pub mod text;
pub mod tick;

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use serenity::all::GuildId;
use tokio::sync::RwLock;

use crate::{
    data::restriction_role_config::RestrictionRoleConfigRepository,
    error::{platform::PlatformError, AppError},
    model::{
        key::MemberKey,
        restriction::{Restriction, RestrictionMode, RestrictionRoleConfig},
    },
    platform::Platform,
    state::GovernanceState,
};

/// Longest communication timeout Discord accepts.
pub const MAX_NATIVE_TIMEOUT_DAYS: i64 = 28;

/// In-memory mirror of the persisted restrictions, at most one per member.
#[derive(Default)]
pub struct RestrictionRegistry {
    restrictions: RwLock<HashMap<MemberKey, Restriction>>,
}

impl RestrictionRegistry {
    pub async fn get(&self, key: MemberKey) -> Option<Restriction> {
        self.restrictions.read().await.get(&key).cloned()
    }

    /// Returns the member's restriction unless it is already due for lifting.
    pub async fn active(&self, key: MemberKey, now: DateTime<Utc>) -> Option<Restriction> {
        self.get(key)
            .await
            .filter(|restriction| !restriction.is_due(now))
    }

    pub async fn insert(&self, restriction: Restriction) {
        self.restrictions
            .write()
            .await
            .insert(restriction.key, restriction);
    }

    pub async fn remove(&self, key: MemberKey) -> Option<Restriction> {
        self.restrictions.write().await.remove(&key)
    }

    /// Replaces the whole registry, used when reloading from the database.
    pub async fn replace_all(&self, restrictions: Vec<Restriction>) {
        *self.restrictions.write().await = restrictions
            .into_iter()
            .map(|restriction| (restriction.key, restriction))
            .collect();
    }

    /// Lists members whose restriction is due at `now`.
    pub async fn due(&self, now: DateTime<Utc>) -> Vec<MemberKey> {
        self.restrictions
            .read()
            .await
            .values()
            .filter(|restriction| restriction.is_due(now))
            .map(|restriction| restriction.key)
            .collect()
    }

    /// Lists the restrictions of a guild, earliest unlock first and indefinite last.
    pub async fn in_guild(&self, guild_id: GuildId) -> Vec<Restriction> {
        let mut restrictions: Vec<Restriction> = self
            .restrictions
            .read()
            .await
            .values()
            .filter(|restriction| restriction.key.guild_id == guild_id)
            .cloned()
            .collect();
        restrictions.sort_by_key(|restriction| {
            (restriction.unlock_at.is_none(), restriction.unlock_at)
        });
        restrictions
    }
}

pub struct RestrictionService<'a> {
    state: &'a GovernanceState,
    platform: Arc<dyn Platform>,
}

impl<'a> RestrictionService<'a> {
    pub fn new(state: &'a GovernanceState, platform: Arc<dyn Platform>) -> Self {
        Self { state, platform }
    }

    /// Stores the normal/restricted role pair used by indefinite restrictions.
    ///
    /// Existing restrictions keep the pair captured when they were applied.
    ///
    /// # Returns
    /// - `Ok(())` - Configuration stored
    /// - `Err(AppError::BadRequest)` - Both roles are the same
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn configure_roles(&self, config: &RestrictionRoleConfig) -> Result<(), AppError> {
        if config.normal_role == config.restricted_role {
            return Err(AppError::BadRequest(
                "Normal and restricted roles must differ".to_string(),
            ));
        }

        RestrictionRoleConfigRepository::new(&self.state.db)
            .upsert(config)
            .await
    }

    /// Lists the active restrictions of a guild.
    pub async fn list(&self, guild_id: GuildId) -> Vec<Restriction> {
        self.state.restrictions.in_guild(guild_id).await
    }

    /// Applies the platform side of a restriction.
    ///
    /// Native timeouts are capped at Discord's maximum; longer restrictions keep being
    /// enforced through message and voice blocking until the tick lifts them.
    async fn enforce(
        &self,
        restriction: &Restriction,
        now: DateTime<Utc>,
    ) -> Result<(), PlatformError> {
        let key = restriction.key;
        match restriction.mode {
            RestrictionMode::Timeout => {
                let cap = now + Duration::days(MAX_NATIVE_TIMEOUT_DAYS);
                let until = restriction.unlock_at.map_or(cap, |unlock_at| unlock_at.min(cap));

                self.platform
                    .apply_timeout(key.guild_id, key.user_id, until, &restriction.reason)
                    .await
            }
            RestrictionMode::RoleSwap {
                normal_role,
                restricted_role,
            } => {
                self.platform
                    .grant_role(key.guild_id, key.user_id, restricted_role, &restriction.reason)
                    .await?;
                self.platform
                    .revoke_role(key.guild_id, key.user_id, normal_role, &restriction.reason)
                    .await
            }
        }
    }

    /// Reverses the platform side of a restriction.
    async fn reverse(&self, restriction: &Restriction) -> Result<(), PlatformError> {
        let key = restriction.key;
        match restriction.mode {
            RestrictionMode::Timeout => {
                self.platform
                    .remove_timeout(key.guild_id, key.user_id)
                    .await
            }
            RestrictionMode::RoleSwap {
                normal_role,
                restricted_role,
            } => {
                self.platform
                    .grant_role(key.guild_id, key.user_id, normal_role, "Restriction lifted")
                    .await?;
                self.platform
                    .revoke_role(key.guild_id, key.user_id, restricted_role, "Restriction lifted")
                    .await
            }
        }
    }
}
