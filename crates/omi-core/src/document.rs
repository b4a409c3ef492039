//! The persisted document and the per-user records it holds.
//!
//! A [`Document`] is the single root object written to disk. It carries
//! two mappings keyed by opaque user-id strings: `signin` for check-in
//! records and `fortune` for the daily fortune of each user.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The root object persisted to the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Check-in records keyed by user id.
    #[serde(default)]
    pub signin: BTreeMap<String, CheckInRecord>,
    /// Fortune records keyed by user id.
    #[serde(default)]
    pub fortune: BTreeMap<String, FortuneRecord>,
}

impl Document {
    /// Create an empty document with both mappings empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both mappings are empty.
    pub fn is_empty(&self) -> bool {
        self.signin.is_empty() && self.fortune.is_empty()
    }
}

/// Per-user check-in state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRecord {
    /// Number of days the user has checked in, ever.
    pub total_days: u32,
    /// Length of the current consecutive-day streak.
    pub continuous_days: u32,
    /// Date of the most recent check-in, unset before the first one.
    #[serde(default, with = "date_or_empty")]
    pub last_signin_date: Option<NaiveDate>,
    /// Accumulated points.
    pub points: u64,
    /// Last observed display name of the user.
    #[serde(alias = "name", default)]
    pub display_name: String,
}

impl CheckInRecord {
    /// A zero-valued record for a user who has never checked in.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }
}

/// A user's fortune for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneRecord {
    /// The day this fortune was generated for.
    pub date: NaiveDate,
    /// Love score, 0-100.
    pub love: u8,
    /// Wealth score, 0-100.
    pub wealth: u8,
    /// Career score, 0-100.
    pub career: u8,
    /// Floor of the mean of the three scores.
    pub lucky_index: u8,
    /// The quote drawn for the day.
    pub quote: String,
}

impl FortuneRecord {
    /// Whether this record may still be served on `today`.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// `Option<NaiveDate>` stored as `"YYYY-MM-DD"`, or `""` when unset.
mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
