use crate::{
    data::restriction::RestrictionRepository,
    error::AppError,
    model::{
        key::MemberKey,
        restriction::{Restriction, RestrictionMode},
    },
};
use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use serenity::all::{GuildId, RoleId, UserId};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_all_records;
mod replace;

fn key(guild_id: u64, user_id: u64) -> MemberKey {
    MemberKey::new(GuildId::new(guild_id), UserId::new(user_id))
}

fn timeout_restriction(guild_id: u64, user_id: u64, minutes: i64) -> Restriction {
    let now = Utc::now();
    Restriction {
        key: key(guild_id, user_id),
        unlock_at: Some(now + Duration::minutes(minutes)),
        reason: "spam".to_string(),
        mode: RestrictionMode::Timeout,
        issued_by: UserId::new(99),
        created_at: now,
    }
}
