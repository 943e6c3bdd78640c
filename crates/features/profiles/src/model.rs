use confhub_database::records::ProfileRecord;
use confhub_derive::api_model;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// T-shirt sizes offered to attendees; `_M`/`_W` are men's and women's cuts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeeShirtSize {
    #[default]
    NotSpecified,
    XsM,
    XsW,
    SM,
    SW,
    MM,
    MW,
    LM,
    LW,
    XlM,
    XlW,
    XxlM,
    XxlW,
    XxxlM,
    XxxlW,
}

impl TeeShirtSize {
    pub const ALL: [Self; 15] = [
        Self::NotSpecified,
        Self::XsM,
        Self::XsW,
        Self::SM,
        Self::SW,
        Self::MM,
        Self::MW,
        Self::LM,
        Self::LW,
        Self::XlM,
        Self::XlW,
        Self::XxlM,
        Self::XxlW,
        Self::XxxlM,
        Self::XxxlW,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSpecified => "NOT_SPECIFIED",
            Self::XsM => "XS_M",
            Self::XsW => "XS_W",
            Self::SM => "S_M",
            Self::SW => "S_W",
            Self::MM => "M_M",
            Self::MW => "M_W",
            Self::LM => "L_M",
            Self::LW => "L_W",
            Self::XlM => "XL_M",
            Self::XlW => "XL_W",
            Self::XxlM => "XXL_M",
            Self::XxlW => "XXL_W",
            Self::XxxlM => "XXXL_M",
            Self::XxxlW => "XXXL_W",
        }
    }

    /// Reads a stored value; anything unrecognised is `NotSpecified`.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for TeeShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse of the wire names (`"xl_w"` works).
impl FromStr for TeeShirtSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == wanted)
            .ok_or_else(|| format!("Unknown teeShirtSize '{s}'"))
    }
}

/// A user's profile as returned to clients.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: TeeShirtSize,
    pub conference_keys_to_attend: Vec<String>,
}

impl From<ProfileRecord> for ProfileForm {
    fn from(record: ProfileRecord) -> Self {
        Self {
            display_name: record.display_name,
            main_email: record.main_email,
            tee_shirt_size: TeeShirtSize::from_stored(&record.tee_shirt_size),
            conference_keys_to_attend: record.conference_keys_to_attend,
        }
    }
}

/// Editable subset of a profile. Missing or empty fields are left unchanged.
#[api_model]
#[derive(Clone, Default)]
pub struct ProfileMiniForm {
    pub display_name: Option<String>,
    /// One of the `TeeShirtSize` names, case-insensitive.
    pub tee_shirt_size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_display() {
        for size in TeeShirtSize::ALL {
            let json = serde_json::to_value(size).unwrap();
            assert_eq!(json, size.as_str());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("xxxl_w".parse::<TeeShirtSize>().unwrap(), TeeShirtSize::XxxlW);
        assert_eq!(" M_M ".parse::<TeeShirtSize>().unwrap(), TeeShirtSize::MM);
        assert!("XXXXL_M".parse::<TeeShirtSize>().is_err());
    }

    #[test]
    fn test_unknown_stored_value_is_not_specified() {
        assert_eq!(TeeShirtSize::from_stored("HUGE"), TeeShirtSize::NotSpecified);
        assert_eq!(TeeShirtSize::from_stored("L_W"), TeeShirtSize::LW);
    }
}
