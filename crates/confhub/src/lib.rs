//! Facade crate for ConfHub features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! - Call [`init`] to build every feature slice, register them on an
//!   [`ApiState`](kernel::server::ApiState), then mount [`router`].
//! - Call [`shutdown`] before exiting to stop background workers and close event queues.

use confhub_database::Database;
pub use confhub_domain as domain;
use confhub_domain::config::ApiConfig;
use confhub_event_bus::{EventBus, EventBusError};
pub use confhub_kernel as kernel;
use confhub_kernel::server::ApiState;
use std::borrow::Cow;
use utoipa_axum::router::OpenApiRouter;

/// Feature registry for runtime introspection.
pub mod features {
    pub use confhub_announcements as announcements;
    pub use confhub_conferences as conferences;
    pub use confhub_profiles as profiles;
    pub use confhub_sessions as sessions;

    pub const ENABLED: &[&str] = &["profiles", "conferences", "sessions", "announcements"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[confhub_derive::confhub_error]
pub enum BootstrapError {
    #[error("Event bus error{}: {source}", format_context(context))]
    EventBus {
        #[source]
        source: EventBusError,
        context: Option<Cow<'static, str>>,
    },
}

/// Initializes every feature slice.
///
/// Must run inside a Tokio runtime: the announcements slice spawns its workers here.
///
/// # Errors
/// Returns [`BootstrapError`] if a slice cannot claim its event queues.
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, BootstrapError> {
    let slices = vec![
        features::profiles::init(database),
        features::conferences::init(config, database, events),
        features::sessions::init(database, events),
        features::announcements::init(config, database, events)
            .context("Starting announcement workers")?,
    ];

    tracing::info!(slices = slices.len(), "Feature slices initialized");

    Ok(slices)
}

/// All feature routes plus the system routes.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .merge(kernel::server::router::system_router())
        .merge(features::profiles::router())
        .merge(features::conferences::router())
        .merge(features::sessions::router())
        .merge(features::announcements::router())
}

/// Stops background workers and closes every event channel.
pub fn shutdown(state: &ApiState) {
    let workers =
        state.get_slice::<features::announcements::Announcements>().map_or(0, |a| a.stop());
    let channels = state.events.shutdown();

    tracing::info!(workers, channels, "Feature slices shut down");
}
