use confhub_database::records::SessionRecord;
use confhub_derive::api_model;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    #[default]
    NotSpecified,
    Workshop,
    Lecture,
    Keynote,
    Demo,
    Panel,
}

impl SessionType {
    pub const ALL: [Self; 6] =
        [Self::NotSpecified, Self::Workshop, Self::Lecture, Self::Keynote, Self::Demo, Self::Panel];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSpecified => "NOT_SPECIFIED",
            Self::Workshop => "WORKSHOP",
            Self::Lecture => "LECTURE",
            Self::Keynote => "KEYNOTE",
            Self::Demo => "DEMO",
            Self::Panel => "PANEL",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse of the wire names.
impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("Value '{s}' for property sessionType is not an allowed choice"))
    }
}

/// A session as exchanged with clients. `websafeKey` and `websafeConferenceKey` are
/// assigned by the server.
#[api_model]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionForm {
    pub name: Option<String>,
    pub highlights: Option<String>,
    pub speaker: Option<String>,
    /// Minutes.
    pub duration: Option<i64>,
    /// One of the `SessionType` names; `NOT_SPECIFIED` when omitted.
    pub session_type: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub websafe_key: Option<String>,
    pub websafe_conference_key: Option<String>,
}

impl From<SessionRecord> for SessionForm {
    fn from(record: SessionRecord) -> Self {
        Self {
            name: Some(record.name),
            highlights: record.highlights,
            speaker: record.speaker,
            duration: record.duration,
            session_type: Some(record.session_type),
            start_date: record.start_date,
            start_time: record.start_time,
            websafe_key: Some(record.key),
            websafe_conference_key: Some(record.conference_key),
        }
    }
}

#[api_model]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionForms {
    pub items: Vec<SessionForm>,
}

impl FromIterator<SessionRecord> for SessionForms {
    fn from_iter<I: IntoIterator<Item = SessionRecord>>(records: I) -> Self {
        Self { items: records.into_iter().map(SessionForm::from).collect() }
    }
}

#[api_model]
#[derive(Clone, Default)]
pub struct SessionTypeQuery {
    pub session_type: Option<String>,
}

#[api_model]
#[derive(Clone, Default)]
pub struct SpeakerQuery {
    pub speaker: Option<String>,
}

#[api_model]
#[derive(Clone)]
pub struct SpeakerTypeForm {
    pub speaker: String,
    pub session_type: String,
}

#[api_model]
#[derive(Clone, Default)]
pub struct StartTimeForm {
    /// `HH:MM`; only the first five characters are read.
    pub start_time: Option<String>,
}

/// Sessions starting before `startTime` whose type is not `sessionType`.
#[api_model]
#[derive(Clone)]
pub struct BeforeTimeExcludingTypeForm {
    pub start_time: String,
    pub session_type: String,
}

#[api_model]
#[derive(Clone)]
pub struct WishlistForm {
    pub websafe_session_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_type_names() {
        for kind in SessionType::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
            assert_eq!(kind.as_str().to_lowercase().parse::<SessionType>().unwrap(), kind);
        }

        let err = "HACKATHON".parse::<SessionType>().unwrap_err();
        assert_eq!(err, "Value 'HACKATHON' for property sessionType is not an allowed choice");
    }

    #[test]
    fn test_form_from_record() {
        let record = SessionRecord {
            key: "session:s1".to_owned(),
            conference_key: "conference:c1".to_owned(),
            name: "Ownership".to_owned(),
            highlights: None,
            speaker: Some("Ada".to_owned()),
            duration: Some(45),
            session_type: "LECTURE".to_owned(),
            start_date: Some("2026-10-01".to_owned()),
            start_time: Some("09:30".to_owned()),
        };

        let form = SessionForm::from(record);
        assert_eq!(form.websafe_key.as_deref(), Some("session:s1"));
        assert_eq!(form.websafe_conference_key.as_deref(), Some("conference:c1"));
        assert_eq!(form.session_type.as_deref(), Some("LECTURE"));
    }
}
