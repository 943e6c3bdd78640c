//! Sessions feature slice: sessions belong to a conference and are created by its
//! organizer. Attendees keep a wishlist of sessions on their profile.

mod handlers;
pub mod model;
mod service;

use confhub_database::Database;
use confhub_event_bus::EventBus;
use confhub_kernel::domain::registry::InitializedSlice;
use confhub_kernel::prelude::ApiState;
use tokio::sync::Mutex;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[confhub_derive::confhub_slice]
pub struct Sessions {
    database: Database,
    events: EventBus,
    wishlist: Mutex<()>,
}

impl Sessions {
    #[must_use]
    pub fn build(database: &Database, events: &EventBus) -> Self {
        Self::new(SessionsInner {
            database: database.clone(),
            events: events.clone(),
            wishlist: Mutex::new(()),
        })
    }
}

#[must_use]
pub fn init(database: &Database, events: &EventBus) -> InitializedSlice {
    tracing::info!("Sessions slice initialized");

    InitializedSlice::new(Sessions::build(database, events))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_session))
        .routes(routes!(handlers::get_conference_sessions))
        .routes(routes!(handlers::get_conference_sessions_by_type))
        .routes(routes!(handlers::get_sessions_by_speaker))
        .routes(routes!(handlers::get_sessions_by_speaker_of_type))
        .routes(routes!(handlers::get_sessions_starting_after))
        .routes(routes!(handlers::get_sessions_before_time_excluding_type))
        .routes(routes!(handlers::add_session_to_wishlist))
        .routes(routes!(handlers::get_sessions_in_wishlist))
        .routes(routes!(handlers::remove_session_from_wishlist))
}
