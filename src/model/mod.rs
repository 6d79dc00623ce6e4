//! Domain models shared by the governance services.
//!
//! Entity models are converted into these types at the repository boundary; ids are
//! serenity's typed snowflakes rather than raw integers or strings.

pub mod event;
pub mod invite;
pub mod key;
pub mod restriction;
pub mod voice;
