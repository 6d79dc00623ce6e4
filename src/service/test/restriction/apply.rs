use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;
use crate::data::restriction::RestrictionRepository;

/// Tests applying a 30 minute restriction.
///
/// Expected: native timeout until now+30m, record persisted and registered, notice sent
#[tokio::test]
async fn applies_bounded_restriction_as_timeout() -> Result<(), AppError> {
    let h = Harness::new().await;

    let restriction = apply_timeout(&h, 2, t0()).await?;

    assert_eq!(restriction.mode, RestrictionMode::Timeout);
    assert_eq!(restriction.unlock_at, Some(t0() + minutes(30)));
    assert_eq!(
        h.mock.calls()[0],
        PlatformCall::ApplyTimeout {
            key: member(2),
            until: t0() + minutes(30),
        }
    );
    assert_eq!(h.direct_notices(2), 1);

    let stored = RestrictionRepository::new(h.db()).find(member(2)).await?;
    assert_eq!(stored, Some(restriction.clone()));
    assert_eq!(h.state.restrictions.get(member(2)).await, Some(restriction));

    Ok(())
}

/// Tests applying an indefinite restriction.
///
/// Expected: normal role swapped for the restricted role, no unlock time
#[tokio::test]
async fn applies_indefinite_restriction_as_role_swap() -> Result<(), AppError> {
    let h = Harness::new().await;
    role_swap_guild(&h, 2).await?;

    let restriction = h
        .restrictions()
        .apply(param(2, Duration::zero()), t0())
        .await?;

    assert_eq!(restriction.unlock_at, None);
    assert_eq!(
        restriction.mode,
        RestrictionMode::RoleSwap {
            normal_role: role(NORMAL_ROLE),
            restricted_role: role(RESTRICTED_ROLE),
        }
    );
    assert_eq!(h.mock.roles_of(member(2)), vec![role(RESTRICTED_ROLE)]);

    Ok(())
}

/// Tests an indefinite restriction in a guild without a role pair.
///
/// Expected: Err(MissingConfiguration) and nothing persisted
#[tokio::test]
async fn requires_role_pair_for_indefinite_restriction() -> Result<(), AppError> {
    let h = Harness::new().await;

    let result = h
        .restrictions()
        .apply(param(2, Duration::zero()), t0())
        .await;

    assert!(matches!(result, Err(AppError::MissingConfiguration(_))));
    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 0);

    Ok(())
}

/// Tests a moderator restricting themselves.
///
/// Expected: Err(SelfRestriction)
#[tokio::test]
async fn rejects_self_restriction() -> Result<(), AppError> {
    let h = Harness::new().await;

    let result = h
        .restrictions()
        .apply(param(MODERATOR, minutes(30)), t0())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RestrictionErr(RestrictionError::SelfRestriction))
    ));
    assert!(h.mock.calls().is_empty());

    Ok(())
}

/// Tests restricting a privileged member.
///
/// Expected: Err(PrivilegedTarget) and nothing persisted
#[tokio::test]
async fn rejects_privileged_target() -> Result<(), AppError> {
    let h = Harness::new().await;
    h.mock.set_privileged(member(2));

    let result = apply_timeout(&h, 2, t0()).await;

    assert!(matches!(
        result,
        Err(AppError::RestrictionErr(RestrictionError::PrivilegedTarget(2)))
    ));
    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 0);
    assert!(h.state.restrictions.get(member(2)).await.is_none());

    Ok(())
}

/// Tests a negative duration.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_negative_duration() -> Result<(), AppError> {
    let h = Harness::new().await;

    let result = h.restrictions().apply(param(2, minutes(-5)), t0()).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a restriction the platform refuses to enforce.
///
/// Expected: Err(PermissionDenied) and the record removed again
#[tokio::test]
async fn removes_record_when_enforcement_fails() -> Result<(), AppError> {
    let h = Harness::new().await;
    h.mock.fail(
        MockOp::ApplyTimeout,
        PlatformError::PermissionDenied("role hierarchy".to_string()),
    );

    let result = apply_timeout(&h, 2, t0()).await;

    assert!(matches!(
        result,
        Err(AppError::PlatformErr(PlatformError::PermissionDenied(_)))
    ));
    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 0);
    assert!(h.state.restrictions.get(member(2)).await.is_none());
    assert_eq!(h.direct_notices(2), 0);

    Ok(())
}

/// Tests a replacement the platform refuses to enforce.
///
/// Verifies that the member's existing 30 minute restriction survives a failed attempt
/// to extend it to 60 minutes.
///
/// Expected: Err(PermissionDenied); the previous record stays persisted and registered
#[tokio::test]
async fn keeps_previous_restriction_when_replacement_fails() -> Result<(), AppError> {
    let h = Harness::new().await;
    let previous = apply_timeout(&h, 2, t0()).await?;
    h.mock.fail(
        MockOp::ApplyTimeout,
        PlatformError::PermissionDenied("role hierarchy".to_string()),
    );

    let result = h
        .restrictions()
        .apply(param(2, minutes(60)), t0() + minutes(5))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PlatformErr(PlatformError::PermissionDenied(_)))
    ));
    assert_eq!(
        RestrictionRepository::new(h.db()).find(member(2)).await?,
        Some(previous.clone())
    );
    assert_eq!(h.state.restrictions.get(member(2)).await, Some(previous));

    Ok(())
}

/// Tests a duration whose unlock time lies beyond the representable range.
///
/// Expected: Err(BadRequest) and nothing persisted
#[tokio::test]
async fn rejects_out_of_range_duration() -> Result<(), AppError> {
    let h = Harness::new().await;

    let result = h
        .restrictions()
        .apply(param(2, Duration::days(100_000_000)), t0())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 0);
    assert!(h.mock.calls().is_empty());

    Ok(())
}

/// Tests restricting an already restricted member again.
///
/// Expected: a single record carrying the new unlock time
#[tokio::test]
async fn replaces_existing_restriction() -> Result<(), AppError> {
    let h = Harness::new().await;

    apply_timeout(&h, 2, t0()).await?;
    h.restrictions()
        .apply(param(2, minutes(60)), t0() + minutes(5))
        .await?;

    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 1);
    let stored = RestrictionRepository::new(h.db())
        .find(member(2))
        .await?
        .unwrap();
    assert_eq!(stored.unlock_at, Some(t0() + minutes(65)));
    assert_eq!(timeouts_removed(&h), 0);

    Ok(())
}

/// Tests replacing a timeout with an indefinite restriction.
///
/// Expected: the timeout is removed before the roles are swapped
#[tokio::test]
async fn reverses_previous_mode_on_replace() -> Result<(), AppError> {
    let h = Harness::new().await;
    role_swap_guild(&h, 2).await?;

    apply_timeout(&h, 2, t0()).await?;
    h.restrictions()
        .apply(param(2, Duration::zero()), t0() + minutes(1))
        .await?;

    assert_eq!(timeouts_removed(&h), 1);
    assert_eq!(h.mock.roles_of(member(2)), vec![role(RESTRICTED_ROLE)]);

    Ok(())
}

/// Tests a restriction longer than the platform's timeout limit.
///
/// Expected: native timeout capped at 28 days, unlock time unchanged
#[tokio::test]
async fn caps_native_timeout() -> Result<(), AppError> {
    let h = Harness::new().await;

    let restriction = h
        .restrictions()
        .apply(param(2, Duration::days(60)), t0())
        .await?;

    assert_eq!(restriction.unlock_at, Some(t0() + Duration::days(60)));
    assert_eq!(
        h.mock.calls()[0],
        PlatformCall::ApplyTimeout {
            key: member(2),
            until: t0() + Duration::days(28),
        }
    );

    Ok(())
}
