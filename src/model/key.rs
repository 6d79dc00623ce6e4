use std::fmt;

use serenity::all::{GuildId, UserId};

/// Composite key addressing one member within one guild.
///
/// All per-member state (occupancy, restrictions) is partitioned by this key and never
/// aliased across guilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub guild_id: GuildId,
    pub user_id: UserId,
}

impl MemberKey {
    pub fn new(guild_id: GuildId, user_id: UserId) -> Self {
        Self { guild_id, user_id }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.guild_id, self.user_id)
    }
}
