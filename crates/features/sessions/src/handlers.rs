use crate::Sessions;
use crate::model::{
    BeforeTimeExcludingTypeForm, SessionForm, SessionForms, SessionTypeQuery, SpeakerQuery,
    SpeakerTypeForm, StartTimeForm, WishlistForm,
};
use axum::Json;
use axum::extract::{Path, State};
use confhub_derive::api_handler;
use confhub_domain::constants::{SESSION_TAG, WISHLIST_TAG};
use confhub_kernel::prelude::*;
use confhub_kernel::server::error::ErrorBody;

#[api_handler(
    post,
    path = "/conference/{websafeConferenceKey}/session",
    operation_id = "createSession",
    params(("websafeConferenceKey" = String, Path, description = "Conference key")),
    request_body = SessionForm,
    responses(
        (status = OK, description = "Stored session", body = SessionForm),
        (status = BAD_REQUEST, description = "Missing name, unknown type or malformed date/time", body = ErrorBody),
        (status = FORBIDDEN, description = "Caller is not the organizer", body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = SESSION_TAG,
)]
pub(crate) async fn create_session(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(key): Path<String>,
    ApiJson(form): ApiJson<SessionForm>,
) -> ApiResult<Json<SessionForm>> {
    state.try_get_slice::<Sessions>()?.create_session(&user, &key, form).await.map(Json)
}

#[api_handler(
    get,
    path = "/conference/{websafeConferenceKey}/sessions",
    operation_id = "getConferenceSessions",
    params(("websafeConferenceKey" = String, Path, description = "Conference key")),
    responses(
        (status = OK, description = "Sessions of the conference", body = SessionForms),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    tag = SESSION_TAG,
)]
pub(crate) async fn get_conference_sessions(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> ApiResult<Json<SessionForms>> {
    state.try_get_slice::<Sessions>()?.conference_sessions(&key).await.map(Json)
}

#[api_handler(
    get,
    path = "/conference/{websafeConferenceKey}/sessionsbytype",
    operation_id = "getConferenceSessionsByType",
    params(
        ("websafeConferenceKey" = String, Path, description = "Conference key"),
        ("sessionType" = String, Query, description = "Session type name"),
    ),
    responses(
        (status = OK, description = "Sessions of the conference with the given type", body = SessionForms),
        (status = BAD_REQUEST, description = "Unknown session type", body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    tag = SESSION_TAG,
)]
pub(crate) async fn get_conference_sessions_by_type(
    State(state): State<ApiState>,
    Path(key): Path<String>,
    ApiQuery(query): ApiQuery<SessionTypeQuery>,
) -> ApiResult<Json<SessionForms>> {
    state
        .try_get_slice::<Sessions>()?
        .conference_sessions_by_type(&key, query.session_type.as_deref())
        .await
        .map(Json)
}

#[api_handler(
    get,
    path = "/sessionsbyspeaker",
    operation_id = "getSessionsBySpeaker",
    params(("speaker" = String, Query, description = "Speaker name")),
    responses(
        (status = OK, description = "Sessions given by the speaker", body = SessionForms),
        (status = BAD_REQUEST, description = "Missing speaker", body = ErrorBody),
    ),
    tag = SESSION_TAG,
)]
pub(crate) async fn get_sessions_by_speaker(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<SpeakerQuery>,
) -> ApiResult<Json<SessionForms>> {
    state.try_get_slice::<Sessions>()?.sessions_by_speaker(query.speaker).await.map(Json)
}

#[api_handler(
    post,
    path = "/sessionsbyspeakeroftype",
    operation_id = "getSessionsBySpeakerOfType",
    request_body = SpeakerTypeForm,
    responses(
        (status = OK, description = "Sessions given by the speaker with the given type", body = SessionForms),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = SESSION_TAG,
)]
pub(crate) async fn get_sessions_by_speaker_of_type(
    State(state): State<ApiState>,
    ApiJson(form): ApiJson<SpeakerTypeForm>,
) -> ApiResult<Json<SessionForms>> {
    state.try_get_slice::<Sessions>()?.sessions_by_speaker_of_type(&form).await.map(Json)
}

#[api_handler(
    post,
    path = "/sessionsstartingafter",
    operation_id = "getSessionsStartingAfter",
    request_body = StartTimeForm,
    responses(
        (status = OK, description = "Sessions starting at or after the given time", body = SessionForms),
        (status = BAD_REQUEST, description = "Malformed time", body = ErrorBody),
    ),
    tag = SESSION_TAG,
)]
pub(crate) async fn get_sessions_starting_after(
    State(state): State<ApiState>,
    ApiJson(form): ApiJson<StartTimeForm>,
) -> ApiResult<Json<SessionForms>> {
    state.try_get_slice::<Sessions>()?.sessions_starting_after(form.start_time).await.map(Json)
}

#[api_handler(
    post,
    path = "/sessionsbeforetimeexcludingtype",
    operation_id = "getSessionsBeforeTimeExcludingType",
    request_body = BeforeTimeExcludingTypeForm,
    responses(
        (status = OK, description = "Sessions before the time, excluding the type", body = SessionForms),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = SESSION_TAG,
)]
pub(crate) async fn get_sessions_before_time_excluding_type(
    State(state): State<ApiState>,
    ApiJson(form): ApiJson<BeforeTimeExcludingTypeForm>,
) -> ApiResult<Json<SessionForms>> {
    state
        .try_get_slice::<Sessions>()?
        .sessions_before_time_excluding_type(&form)
        .await
        .map(Json)
}

#[api_handler(
    post,
    path = "/addSessionToWishlist",
    operation_id = "addSessionToWishlist",
    request_body = WishlistForm,
    responses(
        (status = OK, description = "Added", body = BooleanMessage),
        (status = CONFLICT, description = "Unknown session or already wished", body = ErrorBody),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = WISHLIST_TAG,
)]
pub(crate) async fn add_session_to_wishlist(
    State(state): State<ApiState>,
    user: CurrentUser,
    ApiJson(form): ApiJson<WishlistForm>,
) -> ApiResult<Json<BooleanMessage>> {
    let added =
        state.try_get_slice::<Sessions>()?.add_to_wishlist(&user, &form.websafe_session_key).await?;
    Ok(Json(added.into()))
}

#[api_handler(
    get,
    path = "/sessions/wishlist",
    operation_id = "getSessionsInWishList",
    responses(
        (status = OK, description = "Sessions in the caller's wishlist", body = SessionForms),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = WISHLIST_TAG,
)]
pub(crate) async fn get_sessions_in_wishlist(
    State(state): State<ApiState>,
    user: CurrentUser,
) -> ApiResult<Json<SessionForms>> {
    state.try_get_slice::<Sessions>()?.wishlist(&user).await.map(Json)
}

#[api_handler(
    delete,
    path = "/wishlist/session/{websafeSessionKey}",
    operation_id = "removeSessionFromWishList",
    params(("websafeSessionKey" = String, Path, description = "Session key")),
    responses(
        (status = OK, description = "Removed", body = BooleanMessage),
        (status = CONFLICT, description = "Unknown session or not wished", body = ErrorBody),
        (status = UNAUTHORIZED, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = WISHLIST_TAG,
)]
pub(crate) async fn remove_session_from_wishlist(
    State(state): State<ApiState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> ApiResult<Json<BooleanMessage>> {
    let removed = state.try_get_slice::<Sessions>()?.remove_from_wishlist(&user, &key).await?;
    Ok(Json(removed.into()))
}
