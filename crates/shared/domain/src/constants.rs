//! Shared names: entity kinds used as key prefixes, cache keys and API tags.

/// Entity kinds. Websafe keys look like `conference:V1StGXR8Z5jd`.
pub const PROFILE: &str = "profile";
pub const CONFERENCE: &str = "conference";
pub const SESSION: &str = "session";

/// Announcement cache entries.
pub const RECENT_ANNOUNCEMENTS_KEY: &str = "RECENT_ANNOUNCEMENTS";
pub const FEATURED_SPEAKER_KEY: &str = "FEATURED_SPEAKER";

/// OpenAPI tags.
pub const PROFILE_TAG: &str = "Profile";
pub const CONFERENCE_TAG: &str = "Conference";
pub const SESSION_TAG: &str = "Session";
pub const WISHLIST_TAG: &str = "Wishlist";
pub const ANNOUNCEMENT_TAG: &str = "Announcement";
pub const SYSTEM_TAG: &str = "System";
