use crate::Conferences;
use crate::filters::ConferenceQuery;
use crate::model::{ConferenceForm, ConferenceForms, ConferenceQueryForms};
use chrono::Datelike;
use confhub_database::records::{ConferenceRecord, SeatChange};
use confhub_domain::constants::CONFERENCE;
use confhub_domain::events::ConferenceCreated;
use confhub_kernel::dates::{format_date, parse_date};
use confhub_kernel::prelude::*;
use fxhash::FxHashMap;
use tracing::{debug, warn};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn missing_conference(key: &str) -> ApiError {
    ApiError::not_found(format!("No conference found with key: {key}"))
}

fn unexpected_seat_change(change: SeatChange) -> ApiError {
    ApiError::Internal { message: format!("Unexpected seat change: {change:?}").into(), context: None }
}

impl Conferences {
    /// Creates a conference owned by the caller and queues the organizer's confirmation mail.
    pub async fn create_conference(
        &self,
        user: &CurrentUser,
        form: ConferenceForm,
    ) -> ApiResult<ConferenceForm> {
        let name = non_empty(form.name)
            .ok_or_else(|| ApiError::bad_request("Conference 'name' field required"))?;
        let start_date = non_empty(form.start_date)
            .map(|raw| parse_date("startDate", &raw))
            .transpose()?;
        let end_date =
            non_empty(form.end_date).map(|raw| parse_date("endDate", &raw)).transpose()?;

        let profile = user.profile(&self.database).await?;
        let max_attendees = form.max_attendees.unwrap_or(self.defaults.default_max_attendees);

        let record = ConferenceRecord {
            key: EntityKey::generate(CONFERENCE),
            name,
            description: non_empty(form.description),
            organizer_user_id: user.user_id.clone(),
            topics: if form.topics.is_empty() {
                self.defaults.default_topics.clone()
            } else {
                form.topics
            },
            city: Some(non_empty(form.city).unwrap_or_else(|| self.defaults.default_city.clone())),
            start_date: start_date.map(format_date),
            end_date: end_date.map(format_date),
            month: start_date.map_or(0, |date| i64::from(date.month())),
            max_attendees,
            seats_available: max_attendees.max(0),
        };
        self.database.create_conference(&record).await?;
        debug!(key = %record.key, organizer = %user.user_id, "Conference created");

        if let Err(err) = self.events.enqueue(ConferenceCreated {
            conference_key: record.key.clone(),
            name: record.name.clone(),
            organizer_email: user.email.clone(),
            organizer_name: profile.display_name.clone(),
        }) {
            warn!(key = %record.key, error = %err, "Confirmation mail not queued");
        }

        Ok(ConferenceForm::from_record(record, Some(profile.display_name)))
    }

    /// Copies the provided editable fields onto a conference the caller owns.
    pub async fn update_conference(
        &self,
        user: &CurrentUser,
        raw_key: &str,
        form: ConferenceForm,
    ) -> ApiResult<ConferenceForm> {
        let key = EntityKey::verify(raw_key, CONFERENCE)?;
        let _seats = self.seats.lock().await;

        let mut record =
            self.database.conference(&key).await?.ok_or_else(|| missing_conference(raw_key))?;
        if record.organizer_user_id != user.user_id {
            return Err(ApiError::forbidden("Only the owner can update the conference."));
        }

        if let Some(name) = non_empty(form.name) {
            record.name = name;
        }
        if let Some(description) = non_empty(form.description) {
            record.description = Some(description);
        }
        if !form.topics.is_empty() {
            record.topics = form.topics;
        }
        if let Some(city) = non_empty(form.city) {
            record.city = Some(city);
        }
        if let Some(raw) = non_empty(form.start_date) {
            let date = parse_date("startDate", &raw)?;
            record.start_date = Some(format_date(date));
            record.month = i64::from(date.month());
        }
        if let Some(raw) = non_empty(form.end_date) {
            record.end_date = Some(format_date(parse_date("endDate", &raw)?));
        }
        if let Some(max_attendees) = form.max_attendees {
            let delta = max_attendees - record.max_attendees;
            record.max_attendees = max_attendees;
            record.seats_available = (record.seats_available + delta).max(0);
        }

        self.database.save_conference(&record).await?;
        debug!(%key, "Conference updated");

        let profile = user.profile(&self.database).await?;
        Ok(ConferenceForm::from_record(record, Some(profile.display_name)))
    }

    pub async fn get_conference(&self, raw_key: &str) -> ApiResult<ConferenceForm> {
        let key = EntityKey::verify(raw_key, CONFERENCE)?;
        let record =
            self.database.conference(&key).await?.ok_or_else(|| missing_conference(raw_key))?;
        let organizer = self
            .database
            .profile(&record.organizer_user_id)
            .await?
            .map(|profile| profile.display_name);

        Ok(ConferenceForm::from_record(record, organizer))
    }

    pub async fn conferences_created(&self, user: &CurrentUser) -> ApiResult<ConferenceForms> {
        let profile = user.profile(&self.database).await?;
        let records = self.database.conferences_by_organizer(&user.user_id).await?;

        Ok(ConferenceForms {
            items: records
                .into_iter()
                .map(|record| ConferenceForm::from_record(record, Some(profile.display_name.clone())))
                .collect(),
        })
    }

    /// Conferences the caller registered for, in registration order.
    pub async fn conferences_to_attend(&self, user: &CurrentUser) -> ApiResult<ConferenceForms> {
        let profile = user.profile(&self.database).await?;
        let records = self.database.conferences_by_keys(&profile.conference_keys_to_attend).await?;

        let mut organizers: FxHashMap<String, Option<String>> = FxHashMap::default();
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            if !organizers.contains_key(&record.organizer_user_id) {
                let name = self
                    .database
                    .profile(&record.organizer_user_id)
                    .await?
                    .map(|organizer| organizer.display_name);
                organizers.insert(record.organizer_user_id.clone(), name);
            }
            let name = organizers.get(&record.organizer_user_id).cloned().flatten();
            items.push(ConferenceForm::from_record(record, name));
        }

        Ok(ConferenceForms { items })
    }

    pub async fn query_conferences(&self, form: &ConferenceQueryForms) -> ApiResult<ConferenceForms> {
        let query = ConferenceQuery::parse(&form.filters)?;
        let records = self.database.all_conferences().await?;

        Ok(ConferenceForms {
            items: query
                .apply(records)
                .into_iter()
                .map(|record| ConferenceForm::from_record(record, None))
                .collect(),
        })
    }

    /// Takes one seat and records the conference in the caller's profile.
    pub async fn register(&self, user: &CurrentUser, raw_key: &str) -> ApiResult<bool> {
        let key = EntityKey::verify(raw_key, CONFERENCE)?;
        let _seats = self.seats.lock().await;
        user.profile(&self.database).await?;

        match self.database.register_attendee(&user.user_id, &key).await? {
            SeatChange::Registered => {
                debug!(%key, user_id = %user.user_id, "Registered");
                Ok(true)
            },
            SeatChange::AlreadyRegistered => {
                Err(ApiError::conflict("You have already registered for this conference"))
            },
            SeatChange::SoldOut => Err(ApiError::conflict("There are no seats available.")),
            SeatChange::MissingConference => Err(missing_conference(raw_key)),
            other => Err(unexpected_seat_change(other)),
        }
    }

    /// Gives the seat back. Returns `false` when the caller was not registered.
    pub async fn unregister(&self, user: &CurrentUser, raw_key: &str) -> ApiResult<bool> {
        let key = EntityKey::verify(raw_key, CONFERENCE)?;
        let _seats = self.seats.lock().await;
        user.profile(&self.database).await?;

        match self.database.unregister_attendee(&user.user_id, &key).await? {
            SeatChange::Unregistered => {
                debug!(%key, user_id = %user.user_id, "Unregistered");
                Ok(true)
            },
            SeatChange::NotRegistered => Ok(false),
            SeatChange::MissingConference => Err(missing_conference(raw_key)),
            other => Err(unexpected_seat_change(other)),
        }
    }
}
