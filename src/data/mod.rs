//! Database repository layer for the governance records.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never sees database structures. Only durable records live here:
//! invite bindings, restrictions and per-guild settings. Voice occupancy is never
//! persisted.

pub mod invite_role_binding;
pub mod restriction;
pub mod restriction_role_config;
pub mod voice_monitor_config;

#[cfg(test)]
mod test;
