//! Everything a feature handler usually needs.

pub use crate::keys::EntityKey;
pub use crate::server::auth::CurrentUser;
pub use crate::server::error::{ApiError, ApiErrorExt, ApiResult};
pub use crate::server::extract::{ApiJson, ApiQuery};
pub use crate::server::messages::{BooleanMessage, StringMessage};
pub use crate::server::state::ApiState;
