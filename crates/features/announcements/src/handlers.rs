use crate::Announcements;
use axum::Json;
use axum::extract::State;
use confhub_derive::api_handler;
use confhub_domain::constants::ANNOUNCEMENT_TAG;
use confhub_kernel::prelude::*;

#[api_handler(
    get,
    path = "/conference/announcement/get",
    operation_id = "getAnnouncement",
    responses((status = OK, description = "Nearly sold out conferences, or empty", body = StringMessage)),
    tag = ANNOUNCEMENT_TAG,
)]
pub(crate) async fn get_announcement(State(state): State<ApiState>) -> ApiResult<Json<StringMessage>> {
    let text = state.try_get_slice::<Announcements>()?.announcement();
    Ok(Json(StringMessage { data: text }))
}

#[api_handler(
    get,
    path = "/speaker/featured",
    operation_id = "getFeaturedSpeaker",
    responses((status = OK, description = "Featured speaker announcement, or empty", body = StringMessage)),
    tag = ANNOUNCEMENT_TAG,
)]
pub(crate) async fn get_featured_speaker(
    State(state): State<ApiState>,
) -> ApiResult<Json<StringMessage>> {
    let text = state.try_get_slice::<Announcements>()?.featured_speaker();
    Ok(Json(StringMessage { data: text }))
}
