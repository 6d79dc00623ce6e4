use crate::{
    data::voice_monitor_config::VoiceMonitorConfigRepository, error::AppError,
    model::voice::VoiceMonitorConfig,
};
use chrono::Duration;
use serenity::all::{ChannelId, GuildId};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod upsert;
