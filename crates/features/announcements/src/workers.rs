//! Background tasks of the announcements slice.

use crate::Announcements;
use confhub_domain::events::{ConferenceCreated, SessionCreated};
use confhub_event_bus::{DEFAULT_CAPACITY, EventBus, EventBusError, EventReceiverExt};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

/// Starts the refresh timer and claims the two work queues this slice consumes.
///
/// # Errors
/// Returns [`EventBusError::ReceiverTaken`] if another consumer already owns a queue.
pub(crate) fn spawn(
    announcements: &Announcements,
    events: &EventBus,
) -> Result<Vec<JoinHandle<()>>, EventBusError> {
    let mut mails = events.consume::<ConferenceCreated>(DEFAULT_CAPACITY)?;
    let mut sessions = events.consume::<SessionCreated>(DEFAULT_CAPACITY)?;

    let refresher = {
        let announcements = announcements.clone();
        let period = Duration::from_secs(announcements.refresh_seconds.max(1));
        tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if let Err(err) = announcements.refresh_announcement().await {
                    warn!(error = %err, "Announcement refresh failed");
                }
            }
        })
    };

    let mailer = {
        let announcements = announcements.clone();
        tokio::spawn(async move {
            while let Some(event) = mails.next_event().await {
                if let Err(err) = announcements.send_confirmation(&event) {
                    warn!(key = %event.conference_key, error = %err, "Confirmation mail failed");
                }
            }
            debug!("Confirmation mail queue closed");
        })
    };

    let featured = {
        let announcements = announcements.clone();
        tokio::spawn(async move {
            while let Some(event) = sessions.next_event().await {
                if let Err(err) = announcements.update_featured_speaker(&event).await {
                    warn!(key = %event.session_key, error = %err, "Featured speaker update failed");
                }
            }
            debug!("Featured speaker queue closed");
        })
    };

    Ok(vec![refresher, mailer, featured])
}
