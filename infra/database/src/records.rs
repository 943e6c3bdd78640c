//! Stored shapes of ConfHub entities.
//!
//! Dates are `YYYY-MM-DD` and times `HH:MM`, so string order equals chronological order.

use surrealdb::types::SurrealValue;

pub const PROFILE_TABLE: &str = "profile";
pub const CONFERENCE_TABLE: &str = "conference";
pub const SESSION_TABLE: &str = "conference_session";

/// Per-user profile; `user_id` is the token subject.
#[derive(Debug, Clone, PartialEq, Eq, SurrealValue)]
pub struct ProfileRecord {
    pub user_id: String,
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: String,
    pub conference_keys_to_attend: Vec<String>,
    pub session_keys_wishlist: Vec<String>,
}

impl ProfileRecord {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        main_email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            main_email: main_email.into(),
            tee_shirt_size: "NOT_SPECIFIED".to_owned(),
            conference_keys_to_attend: Vec::new(),
            session_keys_wishlist: Vec::new(),
        }
    }
}

/// Result of a registration transaction. Nothing is written unless it is `Registered` or
/// `Unregistered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatChange {
    Registered,
    Unregistered,
    AlreadyRegistered,
    NotRegistered,
    SoldOut,
    MissingConference,
    MissingProfile,
}

impl SeatChange {
    pub(crate) fn parse(outcome: &str) -> Option<Self> {
        Some(match outcome {
            "registered" => Self::Registered,
            "unregistered" => Self::Unregistered,
            "already_registered" => Self::AlreadyRegistered,
            "not_registered" => Self::NotRegistered,
            "sold_out" => Self::SoldOut,
            "missing_conference" => Self::MissingConference,
            "missing_profile" => Self::MissingProfile,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SurrealValue)]
pub struct ConferenceRecord {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub organizer_user_id: String,
    pub topics: Vec<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Month of `start_date`, `0` when unknown.
    pub month: i64,
    pub max_attendees: i64,
    pub seats_available: i64,
}

/// A session always belongs to the conference named by `conference_key`.
#[derive(Debug, Clone, PartialEq, Eq, SurrealValue)]
pub struct SessionRecord {
    pub key: String,
    pub conference_key: String,
    pub name: String,
    pub highlights: Option<String>,
    pub speaker: Option<String>,
    pub duration: Option<i64>,
    pub session_type: String,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
}
