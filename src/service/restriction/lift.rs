use chrono::{DateTime, Utc};
use dioxus_logger::tracing;

use crate::{
    data::restriction::RestrictionRepository,
    error::{platform::PlatformError, AppError},
    model::{
        key::MemberKey,
        restriction::{LiftOutcome, Restriction},
    },
    service::{notice, restriction::RestrictionService},
};

use super::text;

impl<'a> RestrictionService<'a> {
    /// Lifts a member's restriction and reverses its enforcement.
    ///
    /// Lifting is idempotent: without an active restriction nothing happens. When the
    /// member has left the guild the record is dropped without reversal. Any other
    /// platform failure leaves the record in place so the next tick retries.
    ///
    /// # Returns
    /// - `Ok(LiftOutcome::Lifted)` - Enforcement reversed and record removed
    /// - `Ok(LiftOutcome::NotRestricted)` - No active restriction existed
    /// - `Ok(LiftOutcome::MemberGone)` - Member left; record dropped
    /// - `Err(AppError::PlatformErr)` - Reversal failed; record kept
    /// - `Err(AppError::DbErr)` - Record could not be deleted
    pub async fn lift(&self, key: MemberKey) -> Result<LiftOutcome, AppError> {
        let _guard = self.state.restriction_locks.lock(key).await;

        match self.state.restrictions.get(key).await {
            Some(restriction) => self.lift_locked(&restriction).await,
            None => Ok(LiftOutcome::NotRestricted),
        }
    }

    /// Lifts a member's restriction only if it is still due at `now`.
    ///
    /// The record is re-read under the member's lock, so a restriction replaced after
    /// the caller picked the key is left alone.
    ///
    /// # Returns
    /// - `Ok(LiftOutcome::NotRestricted)` - No restriction, or one that is not due
    /// - Otherwise as `lift`
    pub(super) async fn lift_due(
        &self,
        key: MemberKey,
        now: DateTime<Utc>,
    ) -> Result<LiftOutcome, AppError> {
        let _guard = self.state.restriction_locks.lock(key).await;

        match self.state.restrictions.get(key).await {
            Some(restriction) if restriction.is_due(now) => self.lift_locked(&restriction).await,
            _ => Ok(LiftOutcome::NotRestricted),
        }
    }

    /// Caller holds the member's restriction lock.
    async fn lift_locked(&self, restriction: &Restriction) -> Result<LiftOutcome, AppError> {
        let key = restriction.key;

        let outcome = match self.reverse(restriction).await {
            Ok(()) => LiftOutcome::Lifted,
            Err(PlatformError::NotFound(_)) => LiftOutcome::MemberGone,
            Err(e) => {
                tracing::warn!(
                    "Failed to lift restriction of member {}, keeping it for retry: {}",
                    key,
                    e
                );
                return Err(e.into());
            }
        };

        RestrictionRepository::new(&self.state.db)
            .delete(key)
            .await?;
        self.state.restrictions.remove(key).await;

        match outcome {
            LiftOutcome::Lifted => {
                tracing::info!("Lifted restriction of member {}", key);
                notice::send_direct(&*self.platform, key.user_id, &text::lifted()).await;
            }
            _ => {
                tracing::info!("Dropped restriction of member {} who left the guild", key);
            }
        }

        Ok(outcome)
    }
}
