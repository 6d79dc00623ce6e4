//! Warden Test Utils
//!
//! Provides shared testing utilities for building repository and service tests for the
//! warden bot. This crate offers a builder pattern for creating test contexts with
//! in-memory SQLite databases and customizable table schemas, plus factories for the
//! governance entities.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories with sensible defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Restriction;
//!
//! #[tokio::test]
//! async fn test_restriction_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Restriction)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
