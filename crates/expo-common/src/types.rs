//! Records shared between the scraper, the chart layer and the dashboard

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type used throughout the application
pub type Timestamp = DateTime<Utc>;

/// One parsed table row, before its date has been checked against the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// `yyyy-mm-dd`, possibly naming a day that does not exist
    pub date: String,
    pub visitors: u64,
    pub pass_holders: u64,
}

/// A single day of attendance figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub visitors: u64,
    pub pass_holders: u64,
}

/// An article that could not be read and contributed no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleWarning {
    pub url: String,
    pub error: String,
}

impl ArticleWarning {
    pub fn new(url: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            url: url.into(),
            error: error.to_string(),
        }
    }
}

impl fmt::Display for ArticleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 読込失敗: {}", self.url, self.error)
    }
}
