use test_utils::factory;

use super::*;
use crate::{
    error::{platform::PlatformError, restriction::RestrictionError, AppError},
    model::restriction::{ApplyRestrictionParam, LiftOutcome, Restriction, RestrictionMode},
    platform::mock::MockOp,
};

mod apply;
mod lift;
mod tick;

const MODERATOR: u64 = 99;
const NORMAL_ROLE: u64 = 10;
const RESTRICTED_ROLE: u64 = 20;

fn param(user_id: u64, duration: Duration) -> ApplyRestrictionParam {
    ApplyRestrictionParam {
        key: member(user_id),
        duration,
        reason: "spam".to_string(),
        issued_by: UserId::new(MODERATOR),
    }
}

/// Guild with a role pair and a member holding the normal role.
async fn role_swap_guild(h: &Harness, user_id: u64) -> Result<(), AppError> {
    factory::create_restriction_role_config(h.db(), GUILD, NORMAL_ROLE, RESTRICTED_ROLE)
        .await?;
    h.mock.set_roles(member(user_id), &[role(NORMAL_ROLE)]);
    Ok(())
}

async fn apply_timeout(
    h: &Harness,
    user_id: u64,
    at: DateTime<Utc>,
) -> Result<Restriction, AppError> {
    h.restrictions().apply(param(user_id, minutes(30)), at).await
}

fn timeouts_removed(h: &Harness) -> usize {
    h.mock
        .count(|call| matches!(call, PlatformCall::RemoveTimeout { .. }))
}
