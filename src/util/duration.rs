use chrono::Duration;

/// Formats a duration for member-facing notices, e.g. `1d 2h 5m`.
///
/// Seconds are only shown for durations under a minute.
pub fn humanize(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    if total < 60 {
        return format!("{}s", total);
    }

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }

    parts.join(" ")
}
