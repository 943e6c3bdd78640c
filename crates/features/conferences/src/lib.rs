//! Conferences feature slice.
//!
//! Organizers create and edit conferences; attendees register for seats. Seat bookkeeping
//! (registration, unregistration and capacity edits) runs under one slice-wide lock, so
//! `seatsAvailable` never goes negative and a seat is never counted twice.

pub mod filters;
mod handlers;
pub mod model;
mod service;

use confhub_database::Database;
use confhub_domain::config::{ApiConfig, ConferenceDefaults};
use confhub_event_bus::EventBus;
use confhub_kernel::domain::registry::InitializedSlice;
use confhub_kernel::prelude::ApiState;
use tokio::sync::Mutex;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[confhub_derive::confhub_slice]
pub struct Conferences {
    database: Database,
    events: EventBus,
    defaults: ConferenceDefaults,
    seats: Mutex<()>,
}

impl Conferences {
    #[must_use]
    pub fn build(config: &ApiConfig, database: &Database, events: &EventBus) -> Self {
        Self::new(ConferencesInner {
            database: database.clone(),
            events: events.clone(),
            defaults: config.conferences.clone(),
            seats: Mutex::new(()),
        })
    }
}

#[must_use]
pub fn init(config: &ApiConfig, database: &Database, events: &EventBus) -> InitializedSlice {
    tracing::info!(
        default_city = %config.conferences.default_city,
        default_max_attendees = config.conferences.default_max_attendees,
        "Conferences slice initialized"
    );

    InitializedSlice::new(Conferences::build(config, database, events))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_conference))
        .routes(routes!(
            handlers::get_conference,
            handlers::update_conference,
            handlers::register_for_conference,
            handlers::unregister_from_conference
        ))
        .routes(routes!(handlers::get_conferences_created))
        .routes(routes!(handlers::get_conferences_to_attend))
        .routes(routes!(handlers::query_conferences))
}
