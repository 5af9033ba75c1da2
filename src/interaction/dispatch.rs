use tracing::{Instrument, error, instrument};

use crate::{base::types::RoomNotification, service::notify::NotifierClient};

/// Fire-and-forget delivery of a room notification.
///
/// The caller has already answered its own client by the time delivery
/// runs, so the outcome is only logged.
#[instrument(skip_all)]
pub fn dispatch(notifier: NotifierClient, room_id: u64, notification: RoomNotification) {
    tokio::spawn(async move {
        // Deliver the notification.
        let result = notifier.notify(room_id, &notification).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while dispatching notification: {}", err);
        }
    });
}
