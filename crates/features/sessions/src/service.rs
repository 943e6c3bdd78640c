use crate::Sessions;
use crate::model::{
    BeforeTimeExcludingTypeForm, SessionForm, SessionForms, SessionType, SpeakerTypeForm,
};
use confhub_database::records::SessionRecord;
use confhub_domain::constants::{CONFERENCE, SESSION};
use confhub_domain::events::SessionCreated;
use confhub_kernel::dates::{format_date, format_time, parse_date, parse_time};
use confhub_kernel::prelude::*;
use tracing::{debug, warn};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn session_type(raw: &str) -> ApiResult<SessionType> {
    raw.parse().map_err(ApiError::bad_request)
}

impl Sessions {
    /// Adds a session to a conference the caller organizes.
    pub async fn create_session(
        &self,
        user: &CurrentUser,
        raw_conference_key: &str,
        form: SessionForm,
    ) -> ApiResult<SessionForm> {
        let conference_key = EntityKey::verify(raw_conference_key, CONFERENCE)?;
        let conference = self.database.conference(&conference_key).await?.ok_or_else(|| {
            ApiError::not_found(format!("No conference found with key: {raw_conference_key}"))
        })?;
        if conference.organizer_user_id != user.user_id {
            return Err(ApiError::forbidden("Only the owner can create a session."));
        }

        let name =
            non_empty(form.name).ok_or_else(|| ApiError::bad_request("Session 'name' required"))?;
        let kind = non_empty(form.session_type)
            .map(|raw| session_type(&raw))
            .transpose()?
            .unwrap_or_default();
        let start_date =
            non_empty(form.start_date).map(|raw| parse_date("startDate", &raw)).transpose()?;
        let start_time =
            non_empty(form.start_time).map(|raw| parse_time("startTime", &raw)).transpose()?;

        let record = SessionRecord {
            key: EntityKey::generate(SESSION),
            conference_key,
            name,
            highlights: non_empty(form.highlights),
            speaker: non_empty(form.speaker),
            duration: form.duration,
            session_type: kind.as_str().to_owned(),
            start_date: start_date.map(format_date),
            start_time: start_time.map(format_time),
        };
        self.database.create_session(&record).await?;
        debug!(key = %record.key, conference = %record.conference_key, "Session created");

        if let Err(err) = self.events.enqueue(SessionCreated {
            session_key: record.key.clone(),
            conference_key: record.conference_key.clone(),
            speaker: record.speaker.clone(),
        }) {
            warn!(key = %record.key, error = %err, "Featured speaker update not queued");
        }

        Ok(record.into())
    }

    pub async fn conference_sessions(&self, raw_conference_key: &str) -> ApiResult<SessionForms> {
        let key = self.existing_conference(raw_conference_key).await?;
        Ok(self.database.sessions_by_conference(&key).await?.into_iter().collect())
    }

    pub async fn conference_sessions_by_type(
        &self,
        raw_conference_key: &str,
        raw_type: Option<&str>,
    ) -> ApiResult<SessionForms> {
        let key = self.existing_conference(raw_conference_key).await?;
        let kind = session_type(raw_type.unwrap_or_default())?;

        Ok(self
            .database
            .sessions_by_conference_and_type(&key, kind.as_str())
            .await?
            .into_iter()
            .collect())
    }

    pub async fn sessions_by_speaker(&self, speaker: Option<String>) -> ApiResult<SessionForms> {
        let speaker = non_empty(speaker).ok_or_else(|| ApiError::bad_request("Speaker required"))?;
        Ok(self.database.sessions_by_speaker(&speaker).await?.into_iter().collect())
    }

    pub async fn sessions_by_speaker_of_type(
        &self,
        form: &SpeakerTypeForm,
    ) -> ApiResult<SessionForms> {
        if form.speaker.trim().is_empty() {
            return Err(ApiError::bad_request("Speaker required"));
        }
        let kind = session_type(&form.session_type)?;

        Ok(self
            .database
            .sessions_by_speaker_and_type(&form.speaker, kind.as_str())
            .await?
            .into_iter()
            .collect())
    }

    /// Sessions starting at or after `start_time`; every session when no time is given.
    pub async fn sessions_starting_after(
        &self,
        start_time: Option<String>,
    ) -> ApiResult<SessionForms> {
        let records = match non_empty(start_time) {
            Some(raw) => {
                let time = format_time(parse_time("startTime", &raw)?);
                self.database.sessions_starting_at_or_after(&time).await?
            },
            None => self.database.all_sessions().await?,
        };
        Ok(records.into_iter().collect())
    }

    /// Sessions starting before a time that are not of the excluded type.
    ///
    /// Two inequalities on different fields cannot go to the store in one query, so the
    /// time bound is applied by the store and the type exclusion afterwards in memory.
    pub async fn sessions_before_time_excluding_type(
        &self,
        form: &BeforeTimeExcludingTypeForm,
    ) -> ApiResult<SessionForms> {
        let time = format_time(parse_time("startTime", &form.start_time)?);
        let excluded = session_type(&form.session_type)?;

        let records = self.database.sessions_starting_before(&time).await?;
        Ok(records.into_iter().filter(|record| record.session_type != excluded.as_str()).collect())
    }

    pub async fn add_to_wishlist(&self, user: &CurrentUser, raw_session_key: &str) -> ApiResult<bool> {
        let key = EntityKey::verify(raw_session_key, SESSION)?;
        let _wishlist = self.wishlist.lock().await;

        self.existing_session(&key).await?;
        let profile = user.profile(&self.database).await?;
        if profile.session_keys_wishlist.contains(&key) {
            return Err(ApiError::conflict("You already added the session to your wishList"));
        }

        self.database.add_wishlist_session(&user.user_id, &key).await?;
        debug!(%key, user_id = %user.user_id, "Session added to wishlist");

        Ok(true)
    }

    /// The caller's wishlist in the order sessions were added; deleted sessions are skipped.
    pub async fn wishlist(&self, user: &CurrentUser) -> ApiResult<SessionForms> {
        let profile = user.profile(&self.database).await?;
        Ok(self.database.sessions_by_keys(&profile.session_keys_wishlist).await?.into_iter().collect())
    }

    pub async fn remove_from_wishlist(
        &self,
        user: &CurrentUser,
        raw_session_key: &str,
    ) -> ApiResult<bool> {
        let key = EntityKey::verify(raw_session_key, SESSION)?;
        let _wishlist = self.wishlist.lock().await;

        self.existing_session(&key).await?;
        let profile = user.profile(&self.database).await?;
        if !profile.session_keys_wishlist.contains(&key) {
            return Err(ApiError::conflict("You have not added this session to your wishList"));
        }

        self.database.remove_wishlist_session(&user.user_id, &key).await?;
        debug!(%key, user_id = %user.user_id, "Session removed from wishlist");

        Ok(true)
    }

    async fn existing_conference(&self, raw_key: &str) -> ApiResult<String> {
        let key = EntityKey::verify(raw_key, CONFERENCE)?;
        match self.database.conference(&key).await? {
            Some(_) => Ok(key),
            None => Err(ApiError::not_found(format!("No conference found with key: {raw_key}"))),
        }
    }

    async fn existing_session(&self, key: &str) -> ApiResult<()> {
        match self.database.session(key).await? {
            Some(_) => Ok(()),
            None => Err(ApiError::conflict("No session found with this key")),
        }
    }
}
