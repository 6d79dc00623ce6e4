use std::{sync::Arc, time::Duration};

use chrono::Utc;
use serenity::all::{
    Context, EventHandler, Guild, GuildId, InviteCreateEvent, InviteDeleteEvent, Member, Message,
    Ready, User, VoiceState,
};
use serenity::async_trait;

use crate::{
    model::event::GovernanceEvent,
    platform::{discord::DiscordPlatform, Platform},
    service::ingest::EventIngestor,
    state::GovernanceState,
};

pub mod guild;
pub mod invite;
pub mod member;
pub mod message;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub state: GovernanceState,
    pub platform_timeout: Duration,
}

impl Handler {
    pub fn new(state: GovernanceState, platform_timeout: Duration) -> Self {
        Self {
            state,
            platform_timeout,
        }
    }

    /// Hands a normalized event to the ingestor using the callback's HTTP client and cache.
    async fn dispatch(&self, ctx: &Context, event: GovernanceEvent) {
        let platform: Arc<dyn Platform> = Arc::new(DiscordPlatform::new(
            ctx.http.clone(),
            ctx.cache.clone(),
            self.platform_timeout,
        ));

        EventIngestor::new(&self.state, platform)
            .dispatch(event, Utc::now())
            .await;
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(self, ctx, guild, is_new).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(self, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(self, ctx, guild_id, user, member_data_if_available)
            .await;
    }

    /// Called when a member joins, leaves, switches or updates a voice channel
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(self, ctx, old, new).await;
    }

    /// Called when an invite is created
    async fn invite_create(&self, ctx: Context, data: InviteCreateEvent) {
        invite::handle_invite_create(self, ctx, data).await;
    }

    /// Called when an invite is deleted
    async fn invite_delete(&self, ctx: Context, data: InviteDeleteEvent) {
        invite::handle_invite_delete(self, ctx, data).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }
}
