use chrono::{DateTime, Duration, Utc};

use crate::{model::restriction::Restriction, util::duration::humanize};

/// Discord timestamp markup rendered in the reader's timezone.
fn timestamp(at: DateTime<Utc>) -> String {
    format!("<t:{}:F>", at.timestamp())
}

pub fn applied(restriction: &Restriction) -> String {
    match restriction.unlock_at {
        Some(unlock_at) => format!(
            "You have been restricted for {}, until {}.\nReason: {}",
            humanize(unlock_at - restriction.created_at),
            timestamp(unlock_at),
            restriction.reason
        ),
        None => format!(
            "You have been restricted until a moderator lifts it.\nReason: {}",
            restriction.reason
        ),
    }
}

pub fn lifted() -> String {
    "Your restriction has been lifted.".to_string()
}

pub fn voice_blocked(restriction: &Restriction, now: DateTime<Utc>) -> String {
    match restriction.unlock_at {
        Some(unlock_at) => format!(
            "You cannot join voice channels while restricted. Your restriction ends in {}.",
            humanize((unlock_at - now).max(Duration::zero()))
        ),
        None => "You cannot join voice channels while restricted.".to_string(),
    }
}
