//! `queryConferences` filters.
//!
//! The store answers at most one inequality field per query, so filters are validated
//! against that rule before they are evaluated against the stored conferences.

use crate::model::ConferenceQueryForm;
use confhub_database::records::ConferenceRecord;
use confhub_kernel::prelude::*;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    City,
    Topic,
    Month,
    MaxAttendees,
}

impl QueryField {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "CITY" => Some(Self::City),
            "TOPIC" => Some(Self::Topic),
            "MONTH" => Some(Self::Month),
            "MAX_ATTENDEES" => Some(Self::MaxAttendees),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::City => "CITY",
            Self::Topic => "TOPIC",
            Self::Month => "MONTH",
            Self::MaxAttendees => "MAX_ATTENDEES",
        }
    }

    const fn is_numeric(self) -> bool {
        matches!(self, Self::Month | Self::MaxAttendees)
    }

    /// Ascending sort order of two conferences on this field.
    fn compare(self, a: &ConferenceRecord, b: &ConferenceRecord) -> Ordering {
        match self {
            Self::City => a.city.cmp(&b.city),
            // A multi-valued field sorts by its smallest value.
            Self::Topic => a.topics.iter().min().cmp(&b.topics.iter().min()),
            Self::Month => a.month.cmp(&b.month),
            Self::MaxAttendees => a.max_attendees.cmp(&b.max_attendees),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Ne,
}

impl Operator {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "EQ" => Some(Self::Eq),
            "GT" => Some(Self::Gt),
            "GTEQ" => Some(Self::GtEq),
            "LT" => Some(Self::Lt),
            "LTEQ" => Some(Self::LtEq),
            "NE" => Some(Self::Ne),
            _ => None,
        }
    }

    /// Every operator except `EQ` is an inequality.
    #[must_use]
    pub const fn is_inequality(self) -> bool {
        !matches!(self, Self::Eq)
    }

    /// Whether `stored.cmp(requested)` satisfies the operator.
    const fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Gt => ordering.is_gt(),
            Self::GtEq => ordering.is_ge(),
            Self::Lt => ordering.is_lt(),
            Self::LtEq => ordering.is_le(),
            Self::Ne => ordering.is_ne(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterValue {
    Text(String),
    Number(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: QueryField,
    operator: Operator,
    value: FilterValue,
}

impl Filter {
    fn matches(&self, record: &ConferenceRecord) -> bool {
        let op = self.operator;
        match (&self.value, self.field) {
            (FilterValue::Text(value), QueryField::City) => {
                record.city.as_deref().is_some_and(|city| op.holds(city.cmp(value.as_str())))
            },
            (FilterValue::Text(value), QueryField::Topic) => {
                record.topics.iter().any(|topic| op.holds(topic.as_str().cmp(value.as_str())))
            },
            (FilterValue::Number(value), QueryField::Month) => op.holds(record.month.cmp(value)),
            (FilterValue::Number(value), QueryField::MaxAttendees) => {
                op.holds(record.max_attendees.cmp(value))
            },
            _ => false,
        }
    }
}

/// A validated set of filters combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceQuery {
    filters: Vec<Filter>,
    inequality: Option<QueryField>,
}

impl ConferenceQuery {
    /// Validates client filters.
    ///
    /// # Errors
    /// Returns [`ApiError::BadRequest`] for an unknown field or operator, inequalities on
    /// more than one field, or a non-integer value for a numeric field.
    pub fn parse(forms: &[ConferenceQueryForm]) -> ApiResult<Self> {
        let mut query = Self::default();

        for form in forms {
            let (Some(field), Some(operator)) =
                (QueryField::parse(&form.field), Operator::parse(&form.operator))
            else {
                return Err(ApiError::bad_request("Filter contains invalid field or operator."));
            };

            if operator.is_inequality() {
                match query.inequality {
                    Some(existing) if existing != field => {
                        return Err(ApiError::bad_request(
                            "Inequality filter is allowed on only one field.",
                        ));
                    },
                    _ => query.inequality = Some(field),
                }
            }

            let value = if field.is_numeric() {
                let number = form.value.trim().parse().map_err(|_| {
                    ApiError::bad_request(format!(
                        "Filter value for {} must be an integer.",
                        field.as_str()
                    ))
                })?;
                FilterValue::Number(number)
            } else {
                FilterValue::Text(form.value.clone())
            };

            query.filters.push(Filter { field, operator, value });
        }

        Ok(query)
    }

    #[must_use]
    pub const fn inequality_field(&self) -> Option<QueryField> {
        self.inequality
    }

    #[must_use]
    pub fn matches(&self, record: &ConferenceRecord) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Keeps matching conferences, ordered by the inequality field (if any) then by name.
    #[must_use]
    pub fn apply(&self, records: Vec<ConferenceRecord>) -> Vec<ConferenceRecord> {
        let mut matching: Vec<_> = records.into_iter().filter(|r| self.matches(r)).collect();
        matching.sort_by(|a, b| {
            self.inequality
                .map_or(Ordering::Equal, |field| field.compare(a, b))
                .then_with(|| a.name.cmp(&b.name))
        });
        matching
    }
}
