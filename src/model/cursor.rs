use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month, used as the start or end of a selected range.
///
/// Cursors order by [`DateCursor::key`], `year * 12 + month`, so range checks are plain integer
/// comparisons. The string form is `YYYY-MM`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct DateCursor {
    year: i32,
    month: u32,
}

impl DateCursor {
    /// Creates a cursor. `month` is expected to be in `1..=12`; use `FromStr` for checked input.
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The linear month index used for ordering and range inclusion.
    pub fn key(&self) -> i64 {
        month_key(self.year, self.month)
    }

    /// A human label such as `January 2019`.
    pub fn label(&self) -> String {
        match u8::try_from(self.month)
            .ok()
            .and_then(|m| chrono::Month::try_from(m).ok())
        {
            Some(month) => format!("{} {}", month.name(), self.year),
            None => self.to_string(),
        }
    }
}

/// `year * 12 + month` widened so that it cannot overflow.
pub(crate) fn month_key(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month)
}

impl PartialOrd for DateCursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateCursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for DateCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCursorError(String);

impl fmt::Display for DateCursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for DateCursorError {}

impl FromStr for DateCursor {
    type Err = DateCursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Expected format: "2019-01"
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| DateCursorError(format!("Expected a month as YYYY-MM, got: {s}")))?;
        let year = year
            .parse::<i32>()
            .map_err(|e| DateCursorError(format!("Invalid year in '{s}': {e}")))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| DateCursorError(format!("Invalid month in '{s}': {e}")))?;
        if !(1..=12).contains(&month) {
            return Err(DateCursorError(format!(
                "Month must be between 1 and 12, got {month} in '{s}'"
            )));
        }
        Ok(DateCursor { year, month })
    }
}

impl Serialize for DateCursor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateCursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateCursor::from_str(&s).map_err(serde::de::Error::custom)
    }
}
