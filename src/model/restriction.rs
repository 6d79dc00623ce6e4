//! Restriction (mute) models.

use chrono::{DateTime, Duration, Utc};
use serenity::all::{GuildId, RoleId, UserId};

use crate::{error::AppError, model::key::MemberKey, util::parse::parse_snowflake};

const MODE_TIMEOUT: &str = "timeout";
const MODE_ROLE_SWAP: &str = "role_swap";

/// How a restriction is enforced on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionMode {
    /// Platform-native communication timeout. Used for bounded restrictions.
    Timeout,
    /// The normal role is replaced by the restricted role. Used for indefinite
    /// restrictions; the pair is captured so lifting never depends on current settings.
    RoleSwap {
        normal_role: RoleId,
        restricted_role: RoleId,
    },
}

impl RestrictionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => MODE_TIMEOUT,
            Self::RoleSwap { .. } => MODE_ROLE_SWAP,
        }
    }
}

/// An active restriction on a guild member.
///
/// Restrictions are never patched: applying a new one replaces the old record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub key: MemberKey,
    /// `None` for indefinite restrictions, which no tick ever lifts.
    pub unlock_at: Option<DateTime<Utc>>,
    pub reason: String,
    pub mode: RestrictionMode,
    pub issued_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Restriction {
    /// Whether a tick at `now` should lift this restriction.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        matches!(self.unlock_at, Some(unlock_at) if unlock_at <= now)
    }

    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Restriction)` - Successfully converted restriction
    /// - `Err(AppError::DataCorruption)` - Unparseable id, unknown mode, or a role swap
    ///   row without its role pair
    pub fn from_entity(entity: entity::restriction::Model) -> Result<Self, AppError> {
        let mode = match entity.mode.as_str() {
            MODE_TIMEOUT => RestrictionMode::Timeout,
            MODE_ROLE_SWAP => {
                let (Some(normal), Some(restricted)) =
                    (&entity.normal_role_id, &entity.restricted_role_id)
                else {
                    return Err(AppError::DataCorruption(format!(
                        "role swap restriction for {}/{} is missing its roles",
                        entity.guild_id, entity.user_id
                    )));
                };
                RestrictionMode::RoleSwap {
                    normal_role: RoleId::new(parse_snowflake("normal_role_id", normal)?),
                    restricted_role: RoleId::new(parse_snowflake(
                        "restricted_role_id",
                        restricted,
                    )?),
                }
            }
            other => {
                return Err(AppError::DataCorruption(format!(
                    "unknown restriction mode '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            key: MemberKey::new(
                GuildId::new(parse_snowflake("guild_id", &entity.guild_id)?),
                UserId::new(parse_snowflake("user_id", &entity.user_id)?),
            ),
            unlock_at: entity.unlock_at,
            reason: entity.reason,
            mode,
            issued_by: UserId::new(parse_snowflake("issued_by", &entity.issued_by)?),
            created_at: entity.created_at,
        })
    }
}

/// Role pair used by indefinite restrictions in a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictionRoleConfig {
    pub guild_id: GuildId,
    pub normal_role: RoleId,
    pub restricted_role: RoleId,
}

impl RestrictionRoleConfig {
    pub fn from_entity(entity: entity::restriction_role_config::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: GuildId::new(parse_snowflake("guild_id", &entity.guild_id)?),
            normal_role: RoleId::new(parse_snowflake("normal_role_id", &entity.normal_role_id)?),
            restricted_role: RoleId::new(parse_snowflake(
                "restricted_role_id",
                &entity.restricted_role_id,
            )?),
        })
    }
}

/// Parameters for applying a restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRestrictionParam {
    pub key: MemberKey,
    /// Zero means indefinite.
    pub duration: Duration,
    pub reason: String,
    pub issued_by: UserId,
}

/// Result of a lift request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftOutcome {
    /// Enforcement was reversed and the record removed.
    Lifted,
    /// No active restriction existed; nothing happened.
    NotRestricted,
    /// The member left the guild; the record was dropped without reversal.
    MemberGone,
}

/// Outcome of one restriction tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictionTickReport {
    pub lifted: Vec<MemberKey>,
    /// Restrictions of members who left the guild, dropped without reversal.
    pub dropped: Vec<MemberKey>,
    /// Restrictions that could not be lifted and stay for the next tick.
    pub failed: Vec<MemberKey>,
}

impl RestrictionTickReport {
    pub fn is_empty(&self) -> bool {
        self.lifted.is_empty() && self.dropped.is_empty() && self.failed.is_empty()
    }
}
