use crate::Conferences;
use crate::model::{ConferenceForm, ConferenceForms, ConferenceQueryForms};
use axum::Json;
use axum::extract::{Path, State};
use confhub_derive::api_handler;
use confhub_domain::constants::CONFERENCE_TAG;
use confhub_kernel::prelude::*;
use confhub_kernel::server::error::ErrorBody;

#[api_handler(
    post,
    path = "/conference",
    operation_id = "createConference",
    request_body = ConferenceForm,
    responses(
        (status = OK, description = "Stored conference", body = ConferenceForm),
        (status = BAD_REQUEST, description = "Missing name or malformed date", body = ErrorBody),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn create_conference(
    State(state): State<ApiState>,
    user: CurrentUser,
    ApiJson(form): ApiJson<ConferenceForm>,
) -> ApiResult<Json<ConferenceForm>> {
    state.try_get_slice::<Conferences>()?.create_conference(&user, form).await.map(Json)
}

#[api_handler(
    put,
    path = "/conference/{websafeConferenceKey}",
    operation_id = "updateConference",
    params(("websafeConferenceKey" = String, Path, description = "Conference key")),
    request_body = ConferenceForm,
    responses(
        (status = OK, description = "Updated conference", body = ConferenceForm),
        (status = FORBIDDEN, description = "Caller is not the organizer", body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn update_conference(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(key): Path<String>,
    ApiJson(form): ApiJson<ConferenceForm>,
) -> ApiResult<Json<ConferenceForm>> {
    state.try_get_slice::<Conferences>()?.update_conference(&user, &key, form).await.map(Json)
}

#[api_handler(
    get,
    path = "/conference/{websafeConferenceKey}",
    operation_id = "getConference",
    params(("websafeConferenceKey" = String, Path, description = "Conference key")),
    responses(
        (status = OK, description = "Conference", body = ConferenceForm),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn get_conference(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> ApiResult<Json<ConferenceForm>> {
    state.try_get_slice::<Conferences>()?.get_conference(&key).await.map(Json)
}

#[api_handler(
    post,
    path = "/conference/{websafeConferenceKey}",
    operation_id = "registerForConference",
    params(("websafeConferenceKey" = String, Path, description = "Conference key")),
    responses(
        (status = OK, description = "Registered", body = BooleanMessage),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, description = "Already registered or sold out", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn register_for_conference(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> ApiResult<Json<BooleanMessage>> {
    let registered = state.try_get_slice::<Conferences>()?.register(&user, &key).await?;
    Ok(Json(registered.into()))
}

#[api_handler(
    delete,
    path = "/conference/{websafeConferenceKey}",
    operation_id = "unregisterFromConference",
    params(("websafeConferenceKey" = String, Path, description = "Conference key")),
    responses(
        (status = OK, description = "`true` when a registration was removed", body = BooleanMessage),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn unregister_from_conference(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> ApiResult<Json<BooleanMessage>> {
    let removed = state.try_get_slice::<Conferences>()?.unregister(&user, &key).await?;
    Ok(Json(removed.into()))
}

#[api_handler(
    post,
    path = "/getConferencesCreated",
    operation_id = "getConferencesCreated",
    responses(
        (status = OK, description = "Conferences organized by the caller", body = ConferenceForms),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn get_conferences_created(
    State(state): State<ApiState>,
    user: CurrentUser,
) -> ApiResult<Json<ConferenceForms>> {
    state.try_get_slice::<Conferences>()?.conferences_created(&user).await.map(Json)
}

#[api_handler(
    get,
    path = "/conferences/attending",
    operation_id = "getConferencesToAttend",
    responses(
        (status = OK, description = "Conferences the caller registered for", body = ConferenceForms),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn get_conferences_to_attend(
    State(state): State<ApiState>,
    user: CurrentUser,
) -> ApiResult<Json<ConferenceForms>> {
    state.try_get_slice::<Conferences>()?.conferences_to_attend(&user).await.map(Json)
}

#[api_handler(
    post,
    path = "/queryConferences",
    operation_id = "queryConferences",
    request_body = ConferenceQueryForms,
    responses(
        (status = OK, description = "Matching conferences", body = ConferenceForms),
        (status = BAD_REQUEST, description = "Invalid filter", body = ErrorBody),
    ),
    tag = CONFERENCE_TAG,
)]
pub(crate) async fn query_conferences(
    State(state): State<ApiState>,
    ApiJson(form): ApiJson<ConferenceQueryForms>,
) -> ApiResult<Json<ConferenceForms>> {
    state.try_get_slice::<Conferences>()?.query_conferences(&form).await.map(Json)
}
