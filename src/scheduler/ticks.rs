use std::sync::Arc;

use chrono::Utc;
use dioxus_logger::tracing;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::Config,
    error::AppError,
    model::event::{GovernanceEvent, TickKind},
    platform::Platform,
    service::ingest::EventIngestor,
    state::GovernanceState,
};

/// Starts the governance tick scheduler
///
/// Two jobs are scheduled:
/// - Voice presence tick (warn and disconnect long stays in monitored channels)
/// - Restriction tick (lift restrictions whose unlock time has passed)
///
/// # Arguments
/// - `config`: Application configuration holding both cron schedules
/// - `state`: Governance state shared with the event handler
/// - `platform`: Discord platform used by the ticks
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it to shut it down
/// - `Err(AppError::SchedulerErr)` - Invalid schedule or scheduler failure
pub async fn start_scheduler(
    config: &Config,
    state: GovernanceState,
    platform: Arc<dyn Platform>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler
        .add(tick_job(
            &config.voice_tick_schedule,
            TickKind::VoicePresence,
            state.clone(),
            platform.clone(),
        )?)
        .await?;
    scheduler
        .add(tick_job(
            &config.restriction_tick_schedule,
            TickKind::Restrictions,
            state,
            platform,
        )?)
        .await?;

    scheduler.start().await?;

    tracing::info!(
        "Governance scheduler started (voice: '{}', restrictions: '{}')",
        config.voice_tick_schedule,
        config.restriction_tick_schedule
    );

    Ok(scheduler)
}

fn tick_job(
    schedule: &str,
    kind: TickKind,
    state: GovernanceState,
    platform: Arc<dyn Platform>,
) -> Result<Job, AppError> {
    // One guard per tick kind, shared by every run of the job
    let running = Arc::new(Mutex::new(()));

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let state = state.clone();
        let platform = platform.clone();
        let running = running.clone();

        Box::pin(async move {
            run_tick(&state, platform, &running, kind).await;
        })
    })?;

    Ok(job)
}

/// Runs one tick unless the previous tick of the same kind is still running.
///
/// # Returns
/// - `true` - The tick ran to completion
/// - `false` - The tick was skipped
pub async fn run_tick(
    state: &GovernanceState,
    platform: Arc<dyn Platform>,
    running: &Mutex<()>,
    kind: TickKind,
) -> bool {
    let Ok(_running) = running.try_lock() else {
        tracing::warn!("Skipping {:?} tick: the previous one is still running", kind);
        return false;
    };

    EventIngestor::new(state, platform)
        .dispatch(GovernanceEvent::Tick(kind), Utc::now())
        .await;

    true
}
