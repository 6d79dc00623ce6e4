use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;

use crate::{
    data::restriction::RestrictionRepository,
    error::AppError,
    model::restriction::{LiftOutcome, Restriction, RestrictionTickReport},
    service::restriction::RestrictionService,
};

impl<'a> RestrictionService<'a> {
    /// Lifts every restriction whose unlock time has passed.
    ///
    /// Each restriction is lifted independently; one that fails stays registered and is
    /// retried by the next tick. Indefinite restrictions are never lifted here.
    pub async fn tick(&self, now: DateTime<Utc>) -> RestrictionTickReport {
        let mut report = RestrictionTickReport::default();

        for key in self.state.restrictions.due(now).await {
            match self.lift_due(key, now).await {
                Ok(LiftOutcome::Lifted) => report.lifted.push(key),
                Ok(LiftOutcome::MemberGone) => report.dropped.push(key),
                // Lifted or replaced concurrently by a moderator
                Ok(LiftOutcome::NotRestricted) => {}
                Err(e) => {
                    tracing::warn!("Restriction tick failed to lift member {}: {}", key, e);
                    report.failed.push(key);
                }
            }
        }

        report
    }

    /// Loads every persisted restriction into the in-memory registry.
    ///
    /// A guild with any unreadable row is skipped entirely and its rows stay untouched in
    /// the database. Run the tick right after so restrictions that expired during
    /// downtime are lifted immediately.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of restrictions loaded
    /// - `Err(AppError::DbErr)` - The restriction table could not be read
    pub async fn reload(&self) -> Result<usize, AppError> {
        let records = RestrictionRepository::new(&self.state.db)
            .get_all_records()
            .await?;

        let mut by_guild: HashMap<String, Vec<Restriction>> = HashMap::new();
        let mut corrupt: HashSet<String> = HashSet::new();

        for record in records {
            let guild_id = record.guild_id.clone();
            match Restriction::from_entity(record) {
                Ok(restriction) => by_guild.entry(guild_id).or_default().push(restriction),
                Err(e) => {
                    tracing::error!(
                        "Unreadable restriction in guild {}, skipping the guild: {}",
                        guild_id,
                        e
                    );
                    corrupt.insert(guild_id);
                }
            }
        }

        let restrictions: Vec<Restriction> = by_guild
            .into_iter()
            .filter(|(guild_id, _)| !corrupt.contains(guild_id))
            .flat_map(|(_, restrictions)| restrictions)
            .collect();
        let count = restrictions.len();

        self.state.restrictions.replace_all(restrictions).await;

        tracing::info!("Loaded {} active restrictions", count);

        Ok(count)
    }
}
