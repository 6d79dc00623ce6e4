use chrono::{DateTime, Duration, Utc};
use dioxus_logger::tracing;

use crate::{
    data::{
        restriction::RestrictionRepository,
        restriction_role_config::RestrictionRoleConfigRepository,
    },
    error::{restriction::RestrictionError, AppError},
    model::restriction::{ApplyRestrictionParam, Restriction, RestrictionMode},
    service::{notice, restriction::RestrictionService},
};

use super::text;

impl<'a> RestrictionService<'a> {
    /// Restricts a member, replacing any restriction they already have.
    ///
    /// A zero duration restricts indefinitely through the guild's role pair; any other
    /// duration applies a native timeout and unlocks at `now + duration`. The record is
    /// persisted before enforcement. If enforcement fails the member's previous
    /// restriction is restored, or the record removed when there was none. The direct
    /// notice to the member is best-effort.
    ///
    /// # Arguments
    /// - `param` - Target member, duration, reason and issuing moderator
    /// - `now` - Current time, used as the restriction's start
    ///
    /// # Returns
    /// - `Ok(Restriction)` - The active restriction
    /// - `Err(AppError::RestrictionErr)` - Self-restriction or privileged target
    /// - `Err(AppError::BadRequest)` - Negative or out-of-range duration
    /// - `Err(AppError::MissingConfiguration)` - Indefinite restriction without a role pair
    /// - `Err(AppError::PlatformErr)` - Privilege check or enforcement failed
    pub async fn apply(
        &self,
        param: ApplyRestrictionParam,
        now: DateTime<Utc>,
    ) -> Result<Restriction, AppError> {
        let key = param.key;

        if key.user_id == param.issued_by {
            return Err(RestrictionError::SelfRestriction.into());
        }
        if param.duration < Duration::zero() {
            return Err(AppError::BadRequest(
                "Restriction duration must not be negative".to_string(),
            ));
        }
        if self
            .platform
            .is_privileged(key.guild_id, key.user_id)
            .await?
        {
            return Err(RestrictionError::PrivilegedTarget(key.user_id.get()).into());
        }

        let _guard = self.state.restriction_locks.lock(key).await;

        let (mode, unlock_at) = if param.duration.is_zero() {
            let roles = RestrictionRoleConfigRepository::new(&self.state.db)
                .find(key.guild_id)
                .await?
                .ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "guild {} has no restriction roles configured",
                        key.guild_id
                    ))
                })?;
            let mode = RestrictionMode::RoleSwap {
                normal_role: roles.normal_role,
                restricted_role: roles.restricted_role,
            };
            (mode, None)
        } else {
            let unlock_at = now.checked_add_signed(param.duration).ok_or_else(|| {
                AppError::BadRequest("Restriction duration is out of range".to_string())
            })?;
            (RestrictionMode::Timeout, Some(unlock_at))
        };

        let restriction = Restriction {
            key,
            unlock_at,
            reason: param.reason,
            mode,
            issued_by: param.issued_by,
            created_at: now,
        };

        let previous = self.state.restrictions.get(key).await;
        let mode_changed = previous
            .as_ref()
            .is_some_and(|previous| previous.mode != restriction.mode);
        if let (true, Some(previous)) = (mode_changed, &previous) {
            if let Err(e) = self.reverse(previous).await {
                tracing::warn!(
                    "Failed to reverse previous restriction of member {}: {}",
                    key,
                    e
                );
            }
        }

        let repo = RestrictionRepository::new(&self.state.db);
        repo.replace(&restriction).await?;
        self.state.restrictions.insert(restriction.clone()).await;

        if let Err(e) = self.enforce(&restriction, now).await {
            tracing::error!("Failed to enforce restriction of member {}: {}", key, e);

            match previous {
                Some(previous) => {
                    repo.replace(&previous).await?;
                    self.state.restrictions.insert(previous.clone()).await;
                    if mode_changed {
                        if let Err(e) = self.enforce(&previous, now).await {
                            tracing::warn!(
                                "Failed to re-enforce previous restriction of member {}: {}",
                                key,
                                e
                            );
                        }
                    }
                }
                None => {
                    repo.delete(key).await?;
                    self.state.restrictions.remove(key).await;
                }
            }

            return Err(e.into());
        }

        tracing::info!(
            "Member {} restricted by {} ({}, unlock: {})",
            key,
            restriction.issued_by,
            restriction.mode.as_str(),
            restriction
                .unlock_at
                .map_or_else(|| "never".to_string(), |at| at.to_rfc3339())
        );

        notice::send_direct(&*self.platform, key.user_id, &text::applied(&restriction)).await;

        Ok(restriction)
    }
}
