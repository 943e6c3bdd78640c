use crate::Profiles;
use crate::model::{ProfileForm, ProfileMiniForm};
use axum::Json;
use axum::extract::State;
use confhub_derive::api_handler;
use confhub_domain::constants::PROFILE_TAG;
use confhub_kernel::prelude::*;
use confhub_kernel::server::error::ErrorBody;

#[api_handler(
    get,
    path = "/profile",
    operation_id = "getProfile",
    responses(
        (status = OK, description = "Caller's profile", body = ProfileForm),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = PROFILE_TAG,
)]
pub(crate) async fn get_profile(
    State(state): State<ApiState>,
    user: CurrentUser,
) -> ApiResult<Json<ProfileForm>> {
    state.try_get_slice::<Profiles>()?.get_profile(&user).await.map(Json)
}

#[api_handler(
    post,
    path = "/profile",
    operation_id = "saveProfile",
    request_body = ProfileMiniForm,
    responses(
        (status = OK, description = "Updated profile", body = ProfileForm),
        (status = BAD_REQUEST, description = "Unknown tee shirt size", body = ErrorBody),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = PROFILE_TAG,
)]
pub(crate) async fn save_profile(
    State(state): State<ApiState>,
    user: CurrentUser,
    ApiJson(form): ApiJson<ProfileMiniForm>,
) -> ApiResult<Json<ProfileForm>> {
    state.try_get_slice::<Profiles>()?.save_profile(&user, form).await.map(Json)
}
