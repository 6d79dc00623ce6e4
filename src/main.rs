use std::sync::Arc;

use chrono::Utc;
use dioxus_logger::tracing::{self, Level};

use warden::{
    bot,
    config::Config,
    error::AppError,
    model::event::{GovernanceEvent, TickKind},
    platform::{discord::DiscordPlatform, Platform},
    scheduler::ticks,
    service::{ingest::EventIngestor, restriction::RestrictionService},
    startup,
    state::GovernanceState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let state = GovernanceState::new(db);

    // The client's HTTP client and cache exist before the gateway connects
    let client = bot::start::init_bot(&config, state.clone()).await?;
    let platform: Arc<dyn Platform> = Arc::new(DiscordPlatform::new(
        client.http.clone(),
        client.cache.clone(),
        config.platform_timeout,
    ));

    // Restrictions that expired while offline are lifted before anything else runs
    RestrictionService::new(&state, platform.clone())
        .reload()
        .await?;
    EventIngestor::new(&state, platform.clone())
        .dispatch(GovernanceEvent::Tick(TickKind::Restrictions), Utc::now())
        .await;

    let mut scheduler = ticks::start_scheduler(&config, state, platform).await?;

    let bot = tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down"),
        _ = bot => tracing::warn!("Discord bot stopped"),
    }

    scheduler.shutdown().await?;

    Ok(())
}
