//! Governance state shared by the bot handlers and the tick scheduler.
//!
//! This module defines the `GovernanceState` struct which holds the database connection
//! and every in-memory store owned by the governance services. The state is created once
//! during startup and cloned into the event handler and each scheduled job.
//!
//! The in-memory stores are partitioned by composite key:
//! - Invite snapshots per guild
//! - Voice occupancy records per guild member
//! - Active restrictions per guild member (mirror of the persisted records)

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::GuildId;

use crate::{
    model::key::MemberKey,
    service::{
        invite::InviteSnapshotStore, lock::KeyedLocks, restriction::RestrictionRegistry,
        voice::OccupancyStore,
    },
};

/// Shared resources of the governance services.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - Stores and lock tables are behind `Arc`
#[derive(Clone)]
pub struct GovernanceState {
    /// Database connection pool for durable records.
    pub db: DatabaseConnection,

    /// Latest invite use counts per guild.
    pub snapshots: Arc<InviteSnapshotStore>,

    /// Voice occupancy records. Never persisted.
    pub occupancy: Arc<OccupancyStore>,

    /// Active restrictions, loaded from the database at startup.
    pub restrictions: Arc<RestrictionRegistry>,

    /// Serializes snapshot refreshes and attributions of one guild.
    pub invite_locks: Arc<KeyedLocks<GuildId>>,

    /// Serializes apply and lift of one member's restriction.
    pub restriction_locks: Arc<KeyedLocks<MemberKey>>,

    /// Serializes voice events and tick work on one member's occupancy record.
    pub voice_locks: Arc<KeyedLocks<MemberKey>>,
}

impl GovernanceState {
    /// Creates governance state with empty in-memory stores.
    ///
    /// # Arguments
    /// - `db` - Database connection pool with migrations applied
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            snapshots: Arc::new(InviteSnapshotStore::default()),
            occupancy: Arc::new(OccupancyStore::default()),
            restrictions: Arc::new(RestrictionRegistry::default()),
            invite_locks: Arc::new(KeyedLocks::default()),
            restriction_locks: Arc::new(KeyedLocks::default()),
            voice_locks: Arc::new(KeyedLocks::default()),
        }
    }
}
