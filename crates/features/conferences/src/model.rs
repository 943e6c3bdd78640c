use confhub_database::records::ConferenceRecord;
use confhub_derive::api_model;

/// A conference as exchanged with clients.
///
/// On input every field is optional; server-managed fields (`organizerUserId`, `month`,
/// `seatsAvailable`, `websafeKey`, `organizerDisplayName`) are ignored.
#[api_model]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConferenceForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub organizer_user_id: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub month: Option<i64>,
    pub max_attendees: Option<i64>,
    pub seats_available: Option<i64>,
    pub end_date: Option<String>,
    pub websafe_key: Option<String>,
    pub organizer_display_name: Option<String>,
}

impl ConferenceForm {
    #[must_use]
    pub fn from_record(record: ConferenceRecord, organizer_display_name: Option<String>) -> Self {
        Self {
            name: Some(record.name),
            description: record.description,
            organizer_user_id: Some(record.organizer_user_id),
            topics: record.topics,
            city: record.city,
            start_date: record.start_date,
            month: Some(record.month),
            max_attendees: Some(record.max_attendees),
            seats_available: Some(record.seats_available),
            end_date: record.end_date,
            websafe_key: Some(record.key),
            organizer_display_name,
        }
    }
}

#[api_model]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConferenceForms {
    pub items: Vec<ConferenceForm>,
}

/// One query filter, e.g. `{ "field": "CITY", "operator": "EQ", "value": "London" }`.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ConferenceQueryForm {
    /// One of `CITY`, `TOPIC`, `MONTH`, `MAX_ATTENDEES`.
    pub field: String,
    /// One of `EQ`, `GT`, `GTEQ`, `LT`, `LTEQ`, `NE`.
    pub operator: String,
    pub value: String,
}

#[api_model]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConferenceQueryForms {
    #[serde(default)]
    pub filters: Vec<ConferenceQueryForm>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_from_record() {
        let record = ConferenceRecord {
            key: "conference:abc".to_owned(),
            name: "RustConf".to_owned(),
            description: None,
            organizer_user_id: "u-1".to_owned(),
            topics: vec!["Rust".to_owned()],
            city: Some("Berlin".to_owned()),
            start_date: Some("2026-09-01".to_owned()),
            end_date: None,
            month: 9,
            max_attendees: 100,
            seats_available: 42,
        };

        let form = ConferenceForm::from_record(record, Some("Ada".to_owned()));
        assert_eq!(form.websafe_key.as_deref(), Some("conference:abc"));
        assert_eq!(form.organizer_user_id.as_deref(), Some("u-1"));
        assert_eq!(form.month, Some(9));
        assert_eq!(form.seats_available, Some(42));
        assert_eq!(form.organizer_display_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_form_accepts_partial_input() {
        let form: ConferenceForm = serde_json::from_str(r#"{ "name": "Minimal" }"#).unwrap();
        assert_eq!(form.name.as_deref(), Some("Minimal"));
        assert!(form.topics.is_empty());
        assert!(form.max_attendees.is_none());

        let query: ConferenceQueryForms = serde_json::from_str("{}").unwrap();
        assert!(query.filters.is_empty());
    }
}
