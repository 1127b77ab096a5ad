//! Attendance table built from raw scraped records

use chrono::{Datelike, Duration, NaiveDate};
use expo_common::{AttendanceRecord, RawRecord};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Weekday labels, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// Label for a weekday index (Monday = 0). Out-of-range indexes wrap.
pub fn weekday_label(index: u8) -> &'static str {
    WEEKDAY_LABELS[usize::from(index) % WEEKDAY_LABELS.len()]
}

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// One day of the table with its derived calendar fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRow {
    pub date: NaiveDate,
    pub visitors: u64,
    pub pass_holders: u64,
    /// Monday = 0 … Sunday = 6
    pub weekday: u8,
    pub weekday_label: &'static str,
    pub week_start: NaiveDate,
}

impl From<AttendanceRecord> for AttendanceRow {
    fn from(record: AttendanceRecord) -> Self {
        let weekday = record.date.weekday().num_days_from_monday() as u8;
        Self {
            date: record.date,
            visitors: record.visitors,
            pass_holders: record.pass_holders,
            weekday,
            weekday_label: weekday_label(weekday),
            week_start: week_start(record.date),
        }
    }
}

/// Date-ordered attendance, one row per day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceTable {
    rows: Vec<AttendanceRow>,
}

impl AttendanceTable {
    /// Build the table from scratch.
    ///
    /// Dates that are not real calendar days are dropped. When a date occurs
    /// more than once the later record wins.
    pub fn build(raw: &[RawRecord]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, AttendanceRecord> = BTreeMap::new();
        let mut dropped = 0usize;

        for record in raw {
            let Ok(date) = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") else {
                dropped += 1;
                continue;
            };

            let parsed = AttendanceRecord {
                date,
                visitors: record.visitors,
                pass_holders: record.pass_holders,
            };

            if let Some(previous) = by_date.insert(date, parsed) {
                if previous != parsed {
                    warn!(
                        %date,
                        old_visitors = previous.visitors,
                        new_visitors = parsed.visitors,
                        "Conflicting figures for the same date, keeping the later one"
                    );
                }
            }
        }

        if dropped > 0 {
            debug!(dropped, "Dropped records with invalid dates");
        }

        Self {
            rows: by_date.into_values().map(AttendanceRow::from).collect(),
        }
    }

    pub fn rows(&self) -> &[AttendanceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last date in the table
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }

    /// Every Sunday between the first and last date, inclusive
    pub fn sundays(&self) -> Vec<NaiveDate> {
        let Some((first, last)) = self.date_range() else {
            return Vec::new();
        };

        let lead = (7 - first.weekday().num_days_from_sunday()) % 7;
        let mut day = first + Duration::days(i64::from(lead));
        let mut sundays = Vec::new();
        while day <= last {
            sundays.push(day);
            day += Duration::days(7);
        }
        sundays
    }

    /// Largest single count in the table, across both series
    pub fn max_count(&self) -> u64 {
        self.rows
            .iter()
            .map(|r| r.visitors.max(r.pass_holders))
            .max()
            .unwrap_or(0)
    }
}
