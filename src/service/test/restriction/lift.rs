use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Tests lifting a member without a restriction.
///
/// Expected: Ok(NotRestricted) and no platform call
#[tokio::test]
async fn lifting_unrestricted_member_is_noop() -> Result<(), AppError> {
    let h = Harness::new().await;

    let outcome = h.restrictions().lift(member(2)).await?;

    assert_eq!(outcome, LiftOutcome::NotRestricted);
    assert!(h.mock.calls().is_empty());

    Ok(())
}

/// Tests lifting the same restriction twice.
///
/// Expected: Lifted then NotRestricted, with enforcement reversed once
#[tokio::test]
async fn lifting_twice_reverses_once() -> Result<(), AppError> {
    let h = Harness::new().await;
    apply_timeout(&h, 2, t0()).await?;

    let first = h.restrictions().lift(member(2)).await?;
    let second = h.restrictions().lift(member(2)).await?;

    assert_eq!(first, LiftOutcome::Lifted);
    assert_eq!(second, LiftOutcome::NotRestricted);
    assert_eq!(timeouts_removed(&h), 1);
    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 0);

    Ok(())
}

/// Tests lifting an indefinite restriction.
///
/// Expected: the normal role is restored and the restricted role removed
#[tokio::test]
async fn lifting_role_swap_restores_roles() -> Result<(), AppError> {
    let h = Harness::new().await;
    role_swap_guild(&h, 2).await?;
    h.restrictions()
        .apply(param(2, Duration::zero()), t0())
        .await?;

    let outcome = h.restrictions().lift(member(2)).await?;

    assert_eq!(outcome, LiftOutcome::Lifted);
    assert_eq!(h.mock.roles_of(member(2)), vec![role(NORMAL_ROLE)]);

    Ok(())
}

/// Tests lifting the restriction of a member who left the guild.
///
/// Expected: Ok(MemberGone) with the record dropped and no notice sent
#[tokio::test]
async fn drops_restriction_of_departed_member() -> Result<(), AppError> {
    let h = Harness::new().await;
    apply_timeout(&h, 2, t0()).await?;
    h.mock.set_departed(member(2));
    h.mock.clear_calls();

    let outcome = h.restrictions().lift(member(2)).await?;

    assert_eq!(outcome, LiftOutcome::MemberGone);
    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 0);
    assert!(h.state.restrictions.get(member(2)).await.is_none());
    assert_eq!(h.direct_notices(2), 0);

    Ok(())
}

/// Tests lifting when the platform denies the reversal.
///
/// Expected: Err(PermissionDenied) and the record kept for the next tick
#[tokio::test]
async fn keeps_restriction_when_reversal_denied() -> Result<(), AppError> {
    let h = Harness::new().await;
    apply_timeout(&h, 2, t0()).await?;
    h.mock.fail(
        MockOp::RemoveTimeout,
        PlatformError::PermissionDenied("missing moderate members".to_string()),
    );

    let result = h.restrictions().lift(member(2)).await;

    assert!(matches!(
        result,
        Err(AppError::PlatformErr(PlatformError::PermissionDenied(_)))
    ));
    assert_eq!(entity::prelude::Restriction::find().count(h.db()).await?, 1);
    assert!(h.state.restrictions.get(member(2)).await.is_some());

    Ok(())
}
