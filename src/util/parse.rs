use chrono::Duration;

use crate::error::AppError;

/// Parses a stored Discord snowflake.
///
/// Snowflakes are persisted as strings; zero is rejected because serenity id types
/// cannot represent it.
///
/// # Arguments
/// - `field` - Column name, used in the error message
/// - `value` - The stored string
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed non-zero id
/// - `Err(AppError::DataCorruption)` - The value is not a valid snowflake
pub fn parse_snowflake(field: &str, value: &str) -> Result<u64, AppError> {
    match value.parse::<u64>() {
        Ok(0) => Err(AppError::DataCorruption(format!("{} is zero", field))),
        Ok(id) => Ok(id),
        Err(e) => Err(AppError::DataCorruption(format!(
            "Failed to parse {} from '{}': {}",
            field, value, e
        ))),
    }
}

/// Converts a stored number of seconds into a `Duration`.
///
/// # Returns
/// - `Ok(Duration)` - The stored span
/// - `Err(AppError::DataCorruption)` - The value is outside the representable range
pub fn parse_seconds(field: &str, secs: i64) -> Result<Duration, AppError> {
    Duration::try_seconds(secs).ok_or_else(|| {
        AppError::DataCorruption(format!("{} of {} seconds is out of range", field, secs))
    })
}
