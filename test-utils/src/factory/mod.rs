//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating governance entities with sensible
//! defaults, reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let binding = factory::create_invite_role_binding(&db, 1, "abc", 10).await?;
//!     let restriction = factory::restriction::RestrictionFactory::new(&db, 1, 2)
//!         .unlock_at(None)
//!         .role_swap(10, 20)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `invite_role_binding` - Invite code to role bindings
//! - `restriction` - Active member restrictions
//! - `restriction_role_config` - Normal/restricted role pairs per guild
//! - `voice_monitor_config` - Monitored voice channel settings
//! - `helpers` - Shared id generation

pub mod helpers;
pub mod invite_role_binding;
pub mod restriction;
pub mod restriction_role_config;
pub mod voice_monitor_config;

pub use invite_role_binding::create_invite_role_binding;
pub use restriction::create_restriction;
pub use restriction_role_config::create_restriction_role_config;
pub use voice_monitor_config::create_voice_monitor_config;
