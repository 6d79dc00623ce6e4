//! Best-effort delivery helpers for member and log notices.

use std::{sync::Arc, time::Duration};

use dioxus_logger::tracing;
use serenity::all::{ChannelId, MessageId, UserId};
use tokio::task::JoinHandle;

use crate::platform::Platform;

/// Sends a direct notice, logging instead of failing when it cannot be delivered.
///
/// Members often have direct messages disabled; a lost notice never blocks the action
/// it describes.
pub async fn send_direct(platform: &dyn Platform, user_id: UserId, content: &str) -> bool {
    match platform.send_direct_notice(user_id, content).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to send notice to user {}: {}", user_id, e);
            false
        }
    }
}

/// Deletes a posted message after `delay` on a detached task.
///
/// The returned handle may be dropped; the deletion still runs.
pub fn schedule_deletion(
    platform: Arc<dyn Platform>,
    channel_id: ChannelId,
    message_id: MessageId,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        if let Err(e) = platform.delete_message(channel_id, message_id).await {
            tracing::warn!(
                "Failed to delete notice {} in channel {}: {}",
                message_id,
                channel_id,
                e
            );
        }
    })
}
