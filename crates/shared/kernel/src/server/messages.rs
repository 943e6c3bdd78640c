use confhub_derive::api_model;

/// Wraps a single boolean outcome (registration, wishlist changes).
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct BooleanMessage {
    pub data: bool,
}

/// Wraps a single string (announcements, featured speaker). Empty when there is nothing to say.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct StringMessage {
    pub data: String,
}

impl From<bool> for BooleanMessage {
    fn from(data: bool) -> Self {
        Self { data }
    }
}

impl From<Option<String>> for StringMessage {
    fn from(data: Option<String>) -> Self {
        Self { data: data.unwrap_or_default() }
    }
}
