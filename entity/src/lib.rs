//! SeaORM entities for the governance tables.
//!
//! Discord snowflakes are stored as strings and parsed back into typed ids at the
//! repository boundary.

pub mod prelude;

pub mod invite_role_binding;
pub mod restriction;
pub mod restriction_role_config;
pub mod voice_monitor_config;
