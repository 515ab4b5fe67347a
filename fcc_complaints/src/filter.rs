//! Translation of typed filter values into the literal strings the
//! complaints dataset expects.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use phonenumber::{country, Mode, PhoneNumber};

/// Filter values keyed by column name, after formatting.
pub type FormattedFilters = BTreeMap<String, String>;

/// A raw filter value.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Phone(PhoneNumber),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` on whole numbers.
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => {
                write!(f, "{} ", dt.date().format("%Y-%m-%d"))?;
                write_time(f, &dt.time())
            }
            Self::Time(t) => write_time(f, t),
            Self::Phone(number) => write!(f, "{}", number.format().mode(Mode::E164)),
        }
    }
}

fn write_time(f: &mut fmt::Formatter<'_>, t: &NaiveTime) -> fmt::Result {
    if t.nanosecond() == 0 {
        write!(f, "{}", t.format("%H:%M:%S"))
    } else {
        write!(f, "{}", t.format("%H:%M:%S%.6f"))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FilterValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Timezone-aware values keep their local wall-clock reading; the dataset
/// stores floating timestamps.
impl<Tz: TimeZone> From<DateTime<Tz>> for FilterValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.naive_local())
    }
}

impl From<NaiveTime> for FilterValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<PhoneNumber> for FilterValue {
    fn from(value: PhoneNumber) -> Self {
        Self::Phone(value)
    }
}

/// Raw filters for a single query, keyed by column name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSet {
    filters: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter, replacing any earlier value for the same column.
    pub fn with(mut self, name: &str, value: impl Into<FilterValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<FilterValue>) {
        self.filters.insert(name.to_string(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            filters: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Errors from formatting a filter value.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("Filter {field} must be an integer, got {value:?}")]
    NotAnInteger { field: String, value: String },
    #[error("Filter {field} is not a valid phone number ({value:?}): {reason}")]
    Phone {
        field: String,
        value: String,
        reason: String,
    },
}

/// How a column's value is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterRule {
    Integer,
    FloatingTimestamp,
    TimeOfDay,
    PhoneNumber,
    Passthrough,
}

impl FilterRule {
    /// Looks up the rule for a dataset column. Unknown columns pass through.
    pub fn for_field(name: &str) -> Self {
        match name {
            "id" => Self::Integer,
            "ticket_created" | "issue_date" => Self::FloatingTimestamp,
            "issue_time" => Self::TimeOfDay,
            "caller_id_number" | "advertiser_business_phone_number" => Self::PhoneNumber,
            _ => Self::Passthrough,
        }
    }
}

/// Formats filters for one query. `region` is the default country used when
/// a phone number has no country code.
#[derive(Clone, Debug)]
pub struct FilterFormatter {
    region: String,
}

impl FilterFormatter {
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Formats every filter. Fails on the first value that cannot be converted.
    pub fn format(&self, filters: &FilterSet) -> Result<FormattedFilters, FormatError> {
        filters
            .iter()
            .map(|(name, value)| Ok((name.to_string(), self.format_value(name, value)?)))
            .collect()
    }

    /// Formats a single value according to the rule for `name`.
    pub fn format_value(&self, name: &str, value: &FilterValue) -> Result<String, FormatError> {
        match FilterRule::for_field(name) {
            FilterRule::Integer => integer(name, value),
            FilterRule::FloatingTimestamp => Ok(floating_timestamp(value)),
            FilterRule::TimeOfDay => Ok(time_of_day(value)),
            FilterRule::PhoneNumber => self.phone_number(name, value),
            FilterRule::Passthrough => Ok(value.to_string()),
        }
    }

    /// The dataset stores numbers as `NPA-NXX-YYYY` with no country code. The
    /// closest standard rendering is international format minus the leading
    /// `+CC` group.
    fn phone_number(&self, name: &str, value: &FilterValue) -> Result<String, FormatError> {
        let parsed;
        let number = match value {
            FilterValue::Phone(number) => number,
            other => {
                let raw = other.to_string();
                let region = self.region.trim().to_uppercase().parse::<country::Id>().ok();
                let known_region = region.is_some();
                parsed = phonenumber::parse(region, &raw).map_err(|e| FormatError::Phone {
                    field: name.to_string(),
                    value: raw.clone(),
                    reason: if known_region {
                        e.to_string()
                    } else {
                        format!("{} (unknown region {:?})", e, self.region)
                    },
                })?;
                &parsed
            }
        };
        let international = number.format().mode(Mode::International).to_string();
        Ok(match international.split_once(' ') {
            Some((_, national)) => national.to_string(),
            None => number.national().value().to_string(),
        })
    }
}

/// Formats `filters` with `region` as the default phone-number country.
pub fn format_filters(filters: &FilterSet, region: &str) -> Result<FormattedFilters, FormatError> {
    FilterFormatter::new(region).format(filters)
}

fn integer(name: &str, value: &FilterValue) -> Result<String, FormatError> {
    let converted = match value {
        FilterValue::Integer(i) => Some(*i),
        FilterValue::Text(s) => s.trim().parse::<i64>().ok(),
        FilterValue::Float(x)
            if x.is_finite() && x.trunc() >= i64::MIN as f64 && x.trunc() < i64::MAX as f64 =>
        {
            Some(x.trunc() as i64)
        }
        _ => None,
    };
    converted
        .map(|i| i.to_string())
        .ok_or_else(|| FormatError::NotAnInteger {
            field: name.to_string(),
            value: value.to_string(),
        })
}

/// `2016-05-25T09:33:48.000000` for date-times; anything else as-is.
fn floating_timestamp(value: &FilterValue) -> String {
    match value {
        FilterValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        other => other.to_string(),
    }
}

/// `11:00 pm` for times and date-times; anything else as-is.
fn time_of_day(value: &FilterValue) -> String {
    match value {
        FilterValue::Time(t) => t.format("%I:%M %P").to_string(),
        FilterValue::DateTime(dt) => dt.format("%I:%M %P").to_string(),
        other => other.to_string(),
    }
}
