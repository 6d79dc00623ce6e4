//! Discord gateway integration.
//!
//! The bot turns serenity gateway callbacks into `GovernanceEvent` values and hands them
//! to the event ingestor. Handlers never act on Discord themselves; every command goes
//! through the `Platform` trait built from the callback's context.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild availability and the guild cache
//! - `GUILD_MEMBERS` - Member join and leave events (privileged intent)
//! - `GUILD_VOICE_STATES` - Voice state changes and cached voice channel membership
//! - `GUILD_INVITES` - Invite creation and deletion
//! - `GUILD_MESSAGES` - Messages to enforce restrictions on
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
