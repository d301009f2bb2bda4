use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while validating a mood selection. The log is never touched when one of
/// these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoodError {
    #[error("Please select a mood first!")]
    NotSelected,
    #[error("Mood {0} is outside of the allowed range 1..=5")]
    OutOfRange(i64),
}

/// Self reported mood score. 1 is the worst and 5 is the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mood(u8);

impl Mood {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const ALL: [Mood; 5] = [Mood(1), Mood(2), Mood(3), Mood(4), Mood(5)];

    pub fn new_opt(value: i64) -> Option<Mood> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Mood(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Stressed",
            2 => "Not Great",
            3 => "Okay",
            4 => "Good",
            _ => "Excellent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self.0 {
            1 => "😰",
            2 => "😟",
            3 => "😐",
            4 => "🙂",
            _ => "😄",
        }
    }

    /// Position of the mood inside the chart band. 0 for the lowest mood, 1 for the highest.
    pub fn ratio(self) -> f64 {
        (self.0 - Self::MIN) as f64 / (Self::MAX - Self::MIN) as f64
    }
}

impl TryFrom<i64> for Mood {
    type Error = MoodError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Mood::new_opt(value).ok_or(MoodError::OutOfRange(value))
    }
}

impl From<Mood> for i64 {
    fn from(value: Mood) -> Self {
        value.0 as i64
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    /// Accepts either the score ("4") or the label ("good", "not-great", "Not Great").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Mood::try_from(v)?);
        }
        let normalized = s.to_lowercase().replace(['-', '_'], " ");
        Mood::ALL
            .into_iter()
            .find(|mood| mood.label().to_lowercase() == normalized)
            .ok_or_else(|| anyhow!("Can't parse {s} into a mood"))
    }
}

/// One user submitted record. Entries are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub mood: Mood,
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    /// Timestamps are kept with millisecond precision since that is what survives persistence.
    pub fn new(mood: Mood, note: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            mood,
            note: note.into(),
            timestamp: timestamp.trunc_subsecs(3),
        }
    }
}

/// The shape stored under the mood history key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRecordEntity {
    pub mood: i64,
    pub note: String,
    #[serde(with = "iso_date_ser")]
    pub date: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl From<&MoodEntry> for MoodRecordEntity {
    fn from(entry: &MoodEntry) -> Self {
        Self {
            mood: entry.mood.into(),
            note: entry.note.clone(),
            date: entry.timestamp,
            timestamp: entry.timestamp,
        }
    }
}

impl TryFrom<MoodRecordEntity> for MoodEntry {
    type Error = MoodError;

    fn try_from(
        MoodRecordEntity {
            mood,
            note,
            timestamp,
            ..
        }: MoodRecordEntity,
    ) -> Result<Self, Self::Error> {
        Ok(MoodEntry::new(Mood::try_from(mood)?, note, timestamp))
    }
}

/// Dates are written the way browsers print them: `2024-03-15T09:30:00.000Z`.
mod iso_date_ser {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|v| v.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
