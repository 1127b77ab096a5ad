//! Weekday × week pivot of visitor counts

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::{weekday_label, AttendanceTable};

/// Visitor counts keyed by weekday (rows) and week start (columns).
///
/// Only weekdays and weeks that occur in the table are present. A missing
/// combination stays missing; it is never filled with zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotView {
    weekdays: Vec<u8>,
    weeks: Vec<NaiveDate>,
    cells: BTreeMap<(u8, NaiveDate), u64>,
}

impl PivotView {
    pub fn from_table(table: &AttendanceTable) -> Self {
        let mut weekdays = BTreeSet::new();
        let mut weeks = BTreeSet::new();
        let mut cells = BTreeMap::new();

        for row in table.rows() {
            weekdays.insert(row.weekday);
            weeks.insert(row.week_start);
            cells.insert((row.weekday, row.week_start), row.visitors);
        }

        Self {
            weekdays: weekdays.into_iter().collect(),
            weeks: weeks.into_iter().collect(),
            cells,
        }
    }

    /// Weekday indexes present, Monday first
    pub fn weekdays(&self) -> &[u8] {
        &self.weekdays
    }

    /// Labels of the present weekdays, Monday first
    pub fn row_labels(&self) -> Vec<&'static str> {
        self.weekdays.iter().map(|w| weekday_label(*w)).collect()
    }

    /// Week starts present, ascending
    pub fn week_starts(&self) -> &[NaiveDate] {
        &self.weeks
    }

    pub fn get(&self, weekday: u8, week: NaiveDate) -> Option<u64> {
        self.cells.get(&(weekday, week)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Mean of the present values of each row, in row order
    pub fn weekday_means(&self) -> Vec<(u8, f64)> {
        self.weekdays
            .iter()
            .filter_map(|&weekday| {
                let values: Vec<u64> = self
                    .weeks
                    .iter()
                    .filter_map(|&week| self.get(weekday, week))
                    .collect();
                if values.is_empty() {
                    return None;
                }
                let sum: f64 = values.iter().map(|v| *v as f64).sum();
                Some((weekday, sum / values.len() as f64))
            })
            .collect()
    }

    /// Largest cell value
    pub fn max_value(&self) -> u64 {
        self.cells.values().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expo_common::RawRecord;

    fn table(rows: &[(&str, u64)]) -> AttendanceTable {
        let raw: Vec<RawRecord> = rows
            .iter()
            .map(|(date, visitors)| RawRecord {
                date: date.to_string(),
                visitors: *visitors,
                pass_holders: 0,
            })
            .collect();
        AttendanceTable::build(&raw)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_rows_ordered_monday_first() {
        // Sun, Sat, Mon, Wed
        let pivot = PivotView::from_table(&table(&[
            ("2025-06-01", 1),
            ("2025-06-07", 2),
            ("2025-06-02", 3),
            ("2025-06-04", 4),
        ]));

        assert_eq!(pivot.row_labels(), vec!["月", "水", "土", "日"]);
        assert_eq!(pivot.week_starts(), &[date("2025-06-01")]);
    }

    #[test]
    fn test_missing_cells_stay_missing() {
        // Monday in week of 06-01, Tuesday in week of 06-08
        let pivot = PivotView::from_table(&table(&[("2025-06-02", 100), ("2025-06-10", 200)]));

        assert_eq!(pivot.week_starts(), &[date("2025-06-01"), date("2025-06-08")]);
        assert_eq!(pivot.get(0, date("2025-06-01")), Some(100));
        assert_eq!(pivot.get(0, date("2025-06-08")), None);
        assert_eq!(pivot.get(1, date("2025-06-01")), None);
        assert_eq!(pivot.get(1, date("2025-06-08")), Some(200));
    }

    #[test]
    fn test_weekday_means_ignore_missing() {
        // Mondays: 100, 300; Tuesday: 50 only
        let pivot = PivotView::from_table(&table(&[
            ("2025-06-02", 100),
            ("2025-06-09", 300),
            ("2025-06-10", 50),
        ]));

        assert_eq!(pivot.weekday_means(), vec![(0, 200.0), (1, 50.0)]);
        assert_eq!(pivot.max_value(), 300);
    }

    #[test]
    fn test_empty_table_gives_empty_pivot() {
        let pivot = PivotView::from_table(&AttendanceTable::default());
        assert!(pivot.is_empty());
        assert!(pivot.weekday_means().is_empty());
    }
}
