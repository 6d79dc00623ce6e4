use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

/// Voice presence tick, every minute at second 0.
const DEFAULT_VOICE_TICK_SCHEDULE: &str = "0 * * * * *";
/// Restriction tick, every minute at second 30.
const DEFAULT_RESTRICTION_TICK_SCHEDULE: &str = "30 * * * * *";
const DEFAULT_PLATFORM_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Cron expression (with seconds) driving the voice presence tick.
    pub voice_tick_schedule: String,
    /// Cron expression (with seconds) driving the restriction tick.
    pub restriction_tick_schedule: String,
    /// Upper bound on a single Discord API call.
    pub platform_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            voice_tick_schedule: std::env::var("VOICE_TICK_SCHEDULE")
                .unwrap_or_else(|_| DEFAULT_VOICE_TICK_SCHEDULE.to_string()),
            restriction_tick_schedule: std::env::var("RESTRICTION_TICK_SCHEDULE")
                .unwrap_or_else(|_| DEFAULT_RESTRICTION_TICK_SCHEDULE.to_string()),
            platform_timeout: Duration::from_secs(parse_optional_u64(
                "PLATFORM_TIMEOUT_SECS",
                DEFAULT_PLATFORM_TIMEOUT_SECS,
            )?),
        })
    }
}

/// Reads an optional numeric environment variable, falling back to `default` when unset.
fn parse_optional_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
