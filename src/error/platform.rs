use thiserror::Error;

/// Classified failure of a chat platform command.
///
/// Every platform call made by the governance services is mapped into one of these
/// variants so callers can decide between dropping, logging or retrying on the next tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform refused the action (missing permission or role hierarchy).
    ///
    /// Logged and not retried.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The target (member, message, channel) no longer exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or API failure, including call timeouts.
    ///
    /// Tolerated; the next tick effectively retries.
    #[error("Transient platform failure: {0}")]
    Transient(String),
}
