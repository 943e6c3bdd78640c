//! Profiles feature slice: one profile per authenticated user, created lazily.

mod handlers;
pub mod model;
mod service;

use confhub_database::Database;
use confhub_kernel::domain::registry::InitializedSlice;
use confhub_kernel::prelude::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Profiles feature state.
#[confhub_derive::confhub_slice]
pub struct Profiles {
    database: Database,
}

impl Profiles {
    #[must_use]
    pub fn build(database: &Database) -> Self {
        Self::new(ProfilesInner { database: database.clone() })
    }
}

/// Registers the profiles slice.
#[must_use]
pub fn init(database: &Database) -> InitializedSlice {
    tracing::info!("Profiles slice initialized");

    InitializedSlice::new(Profiles::build(database))
}

/// `GET`/`POST /profile`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(handlers::get_profile, handlers::save_profile))
}
