//! Axum plumbing shared by all slices.

pub mod auth;
pub mod error;
pub mod extract;
mod health;
pub mod messages;
pub mod router;
pub mod state;

pub use state::{ApiState, ApiStateBuilder, ApiStateError};
