//! Error types for the governance services.
//!
//! `AppError` is the top-level error that wraps domain-specific errors. Errors never
//! cross an event handler or tick boundary: each handler logs them and moves on to the
//! next item.

pub mod config;
pub mod platform;
pub mod restriction;

use thiserror::Error;

use crate::error::{config::ConfigError, platform::PlatformError, restriction::RestrictionError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord client error from Serenity.
    ///
    /// Boxed due to large size. Only produced while building or running the gateway
    /// client; individual API calls are classified into `PlatformErr`.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// A platform command was rejected or failed.
    #[error(transparent)]
    PlatformErr(#[from] PlatformError),

    /// A restriction request was refused.
    #[error(transparent)]
    RestrictionErr(#[from] RestrictionError),

    /// Invalid administrator input.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),

    /// Required per-guild configuration is absent.
    ///
    /// # Fields
    /// - Message describing what configuration is missing
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A persisted record could not be read back.
    ///
    /// # Fields
    /// - Message describing the unreadable record
    #[error("Corrupt record: {0}")]
    DataCorruption(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
