//! Membership governance for Discord guilds.
//!
//! Three subsystems reconcile gateway events with periodic ticks:
//! - Invite attribution grants the role bound to the invite a new member used
//! - Voice presence monitoring warns and disconnects long stays in a monitored channel
//! - Restriction scheduling enforces mutes and lifts them once they expire
//!
//! The binary wires them to serenity and tokio-cron-scheduler; the library exposes the
//! services for the command layer.

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod platform;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
