//! Routing of normalized platform events to the governance services.
//!
//! Every event is handled to completion here: failures are logged and never propagate
//! to the gateway handler or the tick scheduler. Bot-authored events are ignored by every
//! subsystem.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;

use crate::{
    model::{
        event::{GovernanceEvent, TickKind},
        invite::Attribution,
    },
    platform::Platform,
    service::{invite::InviteService, restriction::RestrictionService, voice::VoiceService},
    state::GovernanceState,
};

pub struct EventIngestor<'a> {
    state: &'a GovernanceState,
    platform: Arc<dyn Platform>,
}

impl<'a> EventIngestor<'a> {
    pub fn new(state: &'a GovernanceState, platform: Arc<dyn Platform>) -> Self {
        Self { state, platform }
    }

    fn invites(&self) -> InviteService<'_> {
        InviteService::new(self.state, self.platform.clone())
    }

    fn voice(&self) -> VoiceService<'_> {
        VoiceService::new(self.state, self.platform.clone())
    }

    fn restrictions(&self) -> RestrictionService<'_> {
        RestrictionService::new(self.state, self.platform.clone())
    }

    /// Handles one event.
    ///
    /// # Arguments
    /// - `event` - Normalized platform event or tick
    /// - `now` - Time the event is processed at
    pub async fn dispatch(&self, event: GovernanceEvent, now: DateTime<Utc>) {
        match event {
            GovernanceEvent::GuildAvailable { guild_id }
            | GovernanceEvent::InviteCreated { guild_id }
            | GovernanceEvent::InviteDeleted { guild_id } => {
                if let Err(e) = self.invites().refresh_snapshot(guild_id, now).await {
                    tracing::warn!(
                        "Failed to refresh invite snapshot of guild {}: {}",
                        guild_id,
                        e
                    );
                }
            }

            GovernanceEvent::MemberJoin { is_bot: true, .. }
            | GovernanceEvent::VoiceStateChange { is_bot: true, .. }
            | GovernanceEvent::MessageCreate { is_bot: true, .. } => {}

            GovernanceEvent::MemberJoin { member, .. } => {
                match self.invites().handle_join(member, now).await {
                    Ok(Attribution::Attributed { code, granted }) => tracing::info!(
                        "Member {} joined through invite {} (granted role: {:?})",
                        member,
                        code,
                        granted
                    ),
                    Ok(Attribution::Unknown) => {
                        tracing::info!("Member {} joined through an unknown invite", member)
                    }
                    Err(e) => tracing::warn!("Failed to attribute join of member {}: {}", member, e),
                }

                if let Err(e) = self.restrictions().restore_on_join(member, now).await {
                    tracing::warn!(
                        "Failed to restore restriction of rejoined member {}: {}",
                        member,
                        e
                    );
                }
            }

            GovernanceEvent::MemberLeave { member } => {
                self.voice().handle_member_leave(member).await;
            }

            GovernanceEvent::VoiceStateChange {
                member,
                old_channel,
                new_channel,
                ..
            } => {
                if old_channel != new_channel {
                    match self
                        .restrictions()
                        .enforce_voice_join(member, new_channel, now)
                        .await
                    {
                        // The disconnect produces its own voice state change
                        Ok(true) => return,
                        Ok(false) => {}
                        Err(e) => tracing::warn!(
                            "Failed to revert voice join of restricted member {}: {}",
                            member,
                            e
                        ),
                    }
                }

                if let Err(e) = self
                    .voice()
                    .handle_voice_state(member, false, old_channel, new_channel, now)
                    .await
                {
                    tracing::warn!("Failed to track voice state of member {}: {}", member, e);
                }
            }

            GovernanceEvent::MessageCreate {
                author,
                channel_id,
                message_id,
                ..
            } => {
                if let Err(e) = self
                    .restrictions()
                    .enforce_message(author, channel_id, message_id, now)
                    .await
                {
                    tracing::warn!(
                        "Failed to delete message of restricted member {}: {}",
                        author,
                        e
                    );
                }
            }

            GovernanceEvent::Tick(TickKind::VoicePresence) => {
                match self.voice().tick(now).await {
                    Ok(report) if !report.is_empty() => tracing::info!(
                        "Voice presence tick: {} warned, {} disconnected, {} pruned",
                        report.warned.len(),
                        report.disconnected.len(),
                        report.pruned.len()
                    ),
                    Ok(_) => {}
                    Err(e) => tracing::error!("Voice presence tick failed: {}", e),
                }
            }

            GovernanceEvent::Tick(TickKind::Restrictions) => {
                let report = self.restrictions().tick(now).await;
                if !report.is_empty() {
                    tracing::info!(
                        "Restriction tick: {} lifted, {} dropped, {} failed",
                        report.lifted.len(),
                        report.dropped.len(),
                        report.failed.len()
                    );
                }
            }
        }
    }
}
