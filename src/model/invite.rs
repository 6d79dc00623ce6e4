//! Invite snapshot and binding models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serenity::all::{GuildId, RoleId};

use crate::{error::AppError, util::parse::parse_snowflake};

/// Live use count of a single invite as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteUses {
    pub code: String,
    pub uses: u64,
}

impl InviteUses {
    pub fn new(code: impl Into<String>, uses: u64) -> Self {
        Self {
            code: code.into(),
            uses,
        }
    }
}

/// Point-in-time copy of a guild's invite use counts.
///
/// Snapshots are only ever replaced wholesale, never merged entry by entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteSnapshot {
    pub captured_at: DateTime<Utc>,
    uses: HashMap<String, u64>,
}

impl InviteSnapshot {
    pub fn capture(invites: &[InviteUses], captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            uses: invites
                .iter()
                .map(|invite| (invite.code.clone(), invite.uses))
                .collect(),
        }
    }

    /// Returns the recorded use count for `code`, if the invite existed at capture time.
    pub fn uses_of(&self, code: &str) -> Option<u64> {
        self.uses.get(code).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.uses.len()
    }

    /// Finds the first invite, in `live` order, whose use count grew since this snapshot.
    ///
    /// Invites missing from the snapshot are compared against zero. When several
    /// invites grew (concurrent joins) the first one wins; the data cannot tell which
    /// join used which invite.
    pub fn first_increase<'a>(&self, live: &'a [InviteUses]) -> Option<&'a InviteUses> {
        live.iter()
            .find(|invite| invite.uses > self.uses_of(&invite.code).unwrap_or(0))
    }
}

/// Binding of an invite code to the role granted to members who use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRoleBinding {
    pub guild_id: GuildId,
    pub code: String,
    pub role_id: RoleId,
    pub created_at: DateTime<Utc>,
}

impl InviteRoleBinding {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(InviteRoleBinding)` - Successfully converted binding
    /// - `Err(AppError::DataCorruption)` - Stored ids could not be parsed
    pub fn from_entity(entity: entity::invite_role_binding::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: GuildId::new(parse_snowflake("guild_id", &entity.guild_id)?),
            code: entity.code,
            role_id: RoleId::new(parse_snowflake("role_id", &entity.role_id)?),
            created_at: entity.created_at,
        })
    }
}

/// Result of resolving which invite a joining member used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    /// The invite was identified and its bound role (if any) handled.
    Attributed { code: String, granted: Option<RoleId> },
    /// No invite count grew, the snapshot was missing, or the fetch failed.
    Unknown,
}
