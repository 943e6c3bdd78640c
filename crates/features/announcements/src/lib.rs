//! Announcements slice.
//!
//! Keeps two cached texts: the "nearly sold out" announcement, refreshed on a timer, and
//! the featured speaker, updated whenever a session is created. It also drains the
//! confirmation mail queue filled by the conferences slice.

mod cache;
mod handlers;
pub mod mail;
mod service;
mod workers;

pub use cache::AnnouncementCache;

use crate::mail::{LogMailer, Mailer};
use confhub_database::Database;
use confhub_domain::config::ApiConfig;
use confhub_event_bus::{EventBus, EventBusError};
use confhub_kernel::domain::registry::InitializedSlice;
use confhub_kernel::prelude::ApiState;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[confhub_derive::confhub_slice]
pub struct Announcements {
    database: Database,
    cache: AnnouncementCache,
    mailer: Arc<dyn Mailer>,
    refresh_seconds: u64,
    nearly_sold_out_threshold: i64,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Announcements {
    #[must_use]
    pub fn build(config: &ApiConfig, database: &Database, mailer: Arc<dyn Mailer>) -> Self {
        Self::new(AnnouncementsInner {
            database: database.clone(),
            cache: AnnouncementCache::default(),
            mailer,
            refresh_seconds: config.announcements.refresh_seconds,
            nearly_sold_out_threshold: config.announcements.nearly_sold_out_threshold,
            workers: Mutex::new(Vec::new()),
        })
    }

    /// Spawns the background workers on the current Tokio runtime.
    ///
    /// # Errors
    /// Returns [`EventBusError::ReceiverTaken`] if the event queues already have consumers.
    pub fn start(&self, events: &EventBus) -> Result<(), EventBusError> {
        let handles = workers::spawn(self, events)?;
        self.workers.lock().extend(handles);
        Ok(())
    }

    /// Aborts the background workers. Returns how many were running.
    pub fn stop(&self) -> usize {
        let handles = std::mem::take(&mut *self.workers.lock());
        let running = handles.iter().filter(|handle| !handle.is_finished()).count();
        for handle in handles {
            handle.abort();
        }
        running
    }
}

/// Builds the slice with the logging mailer and starts its workers.
///
/// # Errors
/// Returns [`EventBusError`] if the event queues cannot be claimed.
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<InitializedSlice, EventBusError> {
    let announcements = Announcements::build(config, database, Arc::new(LogMailer));
    announcements.start(events)?;

    tracing::info!(
        refresh_seconds = config.announcements.refresh_seconds,
        threshold = config.announcements.nearly_sold_out_threshold,
        "Announcements slice initialized"
    );

    Ok(InitializedSlice::new(announcements))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::get_announcement))
        .routes(routes!(handlers::get_featured_speaker))
}
