//! Events exchanged between slices over the event bus.
//!
//! Both travel on work queues: each has exactly one background consumer in the
//! announcements slice.

/// A conference was stored; its organizer gets a confirmation mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceCreated {
    pub conference_key: String,
    pub name: String,
    pub organizer_email: String,
    pub organizer_name: String,
}

/// A session was stored; the featured speaker may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCreated {
    pub session_key: String,
    pub conference_key: String,
    pub speaker: Option<String>,
}
