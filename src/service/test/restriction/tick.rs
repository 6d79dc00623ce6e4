use chrono::Utc;
use test_utils::factory::restriction::RestrictionFactory;

use super::*;

/// Tests the tick lifecycle of bounded and indefinite restrictions.
///
/// Verifies that a 30 minute restriction is lifted by the tick at now+31m and that
/// later ticks neither reverse it again nor touch the indefinite one.
///
/// Expected: exactly one timeout removal; the role swap stays
#[tokio::test]
async fn tick_lifts_due_restrictions_once() -> Result<(), AppError> {
    let h = Harness::new().await;
    role_swap_guild(&h, 3).await?;
    apply_timeout(&h, 2, t0()).await?;
    h.restrictions()
        .apply(param(3, Duration::zero()), t0())
        .await?;

    let early = h.restrictions().tick(t0() + minutes(29)).await;
    assert!(early.is_empty());

    let report = h.restrictions().tick(t0() + minutes(31)).await;
    assert_eq!(report.lifted, vec![member(2)]);
    assert_eq!(timeouts_removed(&h), 1);

    let later = h.restrictions().tick(t0() + Duration::days(400)).await;
    assert!(later.is_empty());
    assert_eq!(timeouts_removed(&h), 1);
    assert!(h.state.restrictions.get(member(3)).await.is_some());

    Ok(())
}

/// Tests a tick whose lift is refused by the platform.
///
/// Expected: reported as failed and retried successfully once permissions recover
#[tokio::test]
async fn tick_retries_failed_lift() -> Result<(), AppError> {
    let h = Harness::new().await;
    apply_timeout(&h, 2, t0()).await?;
    h.mock.fail(
        MockOp::RemoveTimeout,
        PlatformError::PermissionDenied("missing moderate members".to_string()),
    );

    let report = h.restrictions().tick(t0() + minutes(31)).await;
    assert_eq!(report.failed, vec![member(2)]);

    h.mock.recover(MockOp::RemoveTimeout);
    let report = h.restrictions().tick(t0() + minutes(32)).await;
    assert_eq!(report.lifted, vec![member(2)]);

    Ok(())
}

/// Tests restarting with persisted restrictions.
///
/// Verifies that reloading into fresh state reproduces the pre-restart set and that the
/// first tick lifts the one that expired during downtime.
///
/// Expected: registry equal to the persisted set minus the expired restriction
#[tokio::test]
async fn reload_restores_restrictions_and_lifts_expired() -> Result<(), AppError> {
    let h = Harness::new().await;
    role_swap_guild(&h, 4).await?;
    apply_timeout(&h, 2, t0()).await?;
    h.restrictions()
        .apply(param(3, minutes(240)), t0())
        .await?;
    h.restrictions()
        .apply(param(4, Duration::zero()), t0())
        .await?;
    let before = h.restrictions().list(guild()).await;

    let restarted = GovernanceState::new(h.db().clone());
    let service = RestrictionService::new(&restarted, h.platform());

    assert_eq!(service.reload().await?, 3);
    assert_eq!(service.list(guild()).await, before);

    let report = service.tick(t0() + minutes(60)).await;
    assert_eq!(report.lifted, vec![member(2)]);

    let remaining: Vec<Restriction> = before
        .into_iter()
        .filter(|restriction| restriction.key != member(2))
        .collect();
    assert_eq!(service.list(guild()).await, remaining);

    Ok(())
}

/// Tests reloading a guild that has an unreadable restriction row.
///
/// Expected: the whole guild is skipped while other guilds load
#[tokio::test]
async fn reload_skips_guild_with_corrupt_row() -> Result<(), AppError> {
    let h = Harness::new().await;
    RestrictionFactory::new(h.db(), GUILD, 2).build().await?;
    RestrictionFactory::new(h.db(), GUILD, 3)
        .user_id_raw("not-a-snowflake")
        .build()
        .await?;
    RestrictionFactory::new(h.db(), 5, 2)
        .unlock_at(Some(Utc::now() + Duration::hours(1)))
        .build()
        .await?;

    let loaded = h.restrictions().reload().await?;

    assert_eq!(loaded, 1);
    assert!(h.state.restrictions.get(member(2)).await.is_none());
    assert!(h
        .state
        .restrictions
        .get(MemberKey::new(GuildId::new(5), UserId::new(2)))
        .await
        .is_some());

    Ok(())
}

/// Tests a restriction re-applied while the tick is lifting another member.
///
/// Verifies that the tick re-reads each due restriction under the member's lock: the
/// member whose restriction was replaced with a 60 minute one after the tick collected
/// the due keys keeps it.
///
/// Expected: only the in-flight member is lifted; the replacement stays enforced
#[tokio::test]
async fn tick_keeps_restriction_replaced_mid_tick() -> Result<(), AppError> {
    let h = Harness::new().await;
    apply_timeout(&h, 1, t0()).await?;
    apply_timeout(&h, 2, t0()).await?;
    let gate = h.mock.hold(MockOp::RemoveTimeout);
    let now = t0() + minutes(31);

    let restrictions = h.restrictions();
    let tick = restrictions.tick(now);
    let reapply = async {
        gate.reached().await;
        let in_flight = h
            .mock
            .calls()
            .iter()
            .find_map(|call| match call {
                PlatformCall::RemoveTimeout { key } => Some(*key),
                _ => None,
            })
            .unwrap();
        let other = if in_flight == member(1) { 2 } else { 1 };
        let replaced = h.restrictions().apply(param(other, minutes(60)), now).await;
        gate.release();
        (in_flight, member(other), replaced)
    };
    let (report, (in_flight, other, replaced)) = tokio::join!(tick, reapply);
    replaced?;

    assert_eq!(report.lifted, vec![in_flight]);
    assert_eq!(
        h.state.restrictions.get(other).await.and_then(|r| r.unlock_at),
        Some(now + minutes(60))
    );
    assert_eq!(
        h.mock
            .count(|call| matches!(call, PlatformCall::RemoveTimeout { key } if *key == other)),
        0
    );

    Ok(())
}
