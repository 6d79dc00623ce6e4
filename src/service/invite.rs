//! Invite attribution and snapshot maintenance.
//!
//! Discord does not say which invite a joining member used. The service keeps a snapshot
//! of every guild's invite use counts and, on each join, diffs the live counts against it:
//! the first invite whose count grew is taken as the one used. When several invites grew
//! between two snapshots the answer is ambiguous and the first in live-list order wins.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use serenity::all::{GuildId, RoleId};
use tokio::sync::RwLock;

use crate::{
    data::invite_role_binding::InviteRoleBindingRepository,
    error::AppError,
    model::{
        invite::{Attribution, InviteRoleBinding, InviteSnapshot},
        key::MemberKey,
    },
    platform::Platform,
    state::GovernanceState,
};

/// Latest invite snapshot of every guild.
#[derive(Default)]
pub struct InviteSnapshotStore {
    snapshots: RwLock<HashMap<GuildId, InviteSnapshot>>,
}

impl InviteSnapshotStore {
    pub async fn get(&self, guild_id: GuildId) -> Option<InviteSnapshot> {
        self.snapshots.read().await.get(&guild_id).cloned()
    }

    /// Replaces the guild's snapshot wholesale.
    pub async fn replace(&self, guild_id: GuildId, snapshot: InviteSnapshot) {
        self.snapshots.write().await.insert(guild_id, snapshot);
    }
}

pub struct InviteService<'a> {
    state: &'a GovernanceState,
    platform: Arc<dyn Platform>,
}

impl<'a> InviteService<'a> {
    pub fn new(state: &'a GovernanceState, platform: Arc<dyn Platform>) -> Self {
        Self { state, platform }
    }

    /// Fetches the live invite list and replaces the guild's snapshot with it.
    ///
    /// On failure the previous snapshot stays in place.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of invites in the new snapshot
    /// - `Err(AppError::PlatformErr)` - Invite list could not be fetched
    pub async fn refresh_snapshot(
        &self,
        guild_id: GuildId,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let _guard = self.state.invite_locks.lock(guild_id).await;

        let live = self.platform.fetch_invites(guild_id).await?;
        let snapshot = InviteSnapshot::capture(&live, now);
        let count = snapshot.len();

        self.state.snapshots.replace(guild_id, snapshot).await;

        tracing::debug!("Refreshed invite snapshot of guild {} ({} invites)", guild_id, count);

        Ok(count)
    }

    /// Infers which invite a member who just joined used.
    ///
    /// A successful fetch always replaces the snapshot, so a redelivered join diffs
    /// against the post-join counts and attributes nothing. Attributions of one guild are
    /// serialized so two concurrent joins never diff against the same snapshot.
    ///
    /// # Returns
    /// - `Some(code)` - First invite, in live order, whose use count strictly increased
    /// - `None` - No count increased, no snapshot existed yet, or the fetch failed
    pub async fn attribute(&self, guild_id: GuildId, now: DateTime<Utc>) -> Option<String> {
        let _guard = self.state.invite_locks.lock(guild_id).await;

        let live = match self.platform.fetch_invites(guild_id).await {
            Ok(live) => live,
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch invites of guild {} for attribution: {}",
                    guild_id,
                    e
                );
                return None;
            }
        };

        let previous = self.state.snapshots.get(guild_id).await;
        let code = match &previous {
            Some(snapshot) => snapshot
                .first_increase(&live)
                .map(|invite| invite.code.clone()),
            None => {
                tracing::info!(
                    "No invite snapshot for guild {}; installing the live list",
                    guild_id
                );
                None
            }
        };

        self.state
            .snapshots
            .replace(guild_id, InviteSnapshot::capture(&live, now))
            .await;

        code
    }

    /// Grants the role bound to `code`, if any, to the member.
    ///
    /// Members already holding the role are skipped, so repeated calls grant once.
    ///
    /// # Returns
    /// - `Ok(Some(role))` - The bound role was granted
    /// - `Ok(None)` - The code is unbound or the member already holds the role
    /// - `Err(AppError)` - Database error or the platform refused the grant
    pub async fn on_attributed(
        &self,
        member: MemberKey,
        code: &str,
    ) -> Result<Option<RoleId>, AppError> {
        let repo = InviteRoleBindingRepository::new(&self.state.db);

        let Some(binding) = repo.find(member.guild_id, code).await? else {
            return Ok(None);
        };

        let roles = self
            .platform
            .member_roles(member.guild_id, member.user_id)
            .await?;
        if roles.contains(&binding.role_id) {
            tracing::debug!("Member {} already holds role {}", member, binding.role_id);
            return Ok(None);
        }

        let reason = format!("Joined through invite {}", code);
        self.platform
            .grant_role(member.guild_id, member.user_id, binding.role_id, &reason)
            .await?;

        tracing::info!(
            "Granted role {} to member {} for invite {}",
            binding.role_id,
            member,
            code
        );

        Ok(Some(binding.role_id))
    }

    /// Attributes a join and grants the bound role.
    pub async fn handle_join(
        &self,
        member: MemberKey,
        now: DateTime<Utc>,
    ) -> Result<Attribution, AppError> {
        let Some(code) = self.attribute(member.guild_id, now).await else {
            return Ok(Attribution::Unknown);
        };

        let granted = self.on_attributed(member, &code).await?;

        Ok(Attribution::Attributed { code, granted })
    }

    /// Binds an invite code to a role, replacing any existing binding of the code.
    ///
    /// # Returns
    /// - `Ok(InviteRoleBinding)` - The stored binding
    /// - `Err(AppError::BadRequest)` - Empty invite code
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn bind_invite(
        &self,
        guild_id: GuildId,
        code: &str,
        role_id: RoleId,
    ) -> Result<InviteRoleBinding, AppError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::BadRequest(
                "Invite code must not be empty".to_string(),
            ));
        }

        let repo = InviteRoleBindingRepository::new(&self.state.db);
        repo.upsert(guild_id, code, role_id).await?;

        repo.find(guild_id, code).await?.ok_or_else(|| {
            AppError::DataCorruption(format!("binding {} of guild {} vanished", code, guild_id))
        })
    }

    /// Removes the binding of an invite code.
    ///
    /// # Returns
    /// - `Ok(true)` - The binding was removed
    /// - `Ok(false)` - The code was not bound
    pub async fn unbind_invite(&self, guild_id: GuildId, code: &str) -> Result<bool, AppError> {
        InviteRoleBindingRepository::new(&self.state.db)
            .delete(guild_id, code.trim())
            .await
    }

    pub async fn list_bindings(&self, guild_id: GuildId) -> Result<Vec<InviteRoleBinding>, AppError> {
        InviteRoleBindingRepository::new(&self.state.db)
            .get_by_guild(guild_id)
            .await
    }
}
