//! Row parsing: table cells to [`RawRecord`]

use expo_common::{ExpoError, RawRecord, Result};
use regex::Regex;
use std::sync::LazyLock;

/// `<month>月<day>日`, half- or full-width digits
static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9０-９]{1,2})月([0-9０-９]{1,2})日").expect("Invalid month/day regex pattern")
});

/// Map full-width digits to ASCII, leaving everything else untouched.
fn to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            _ => c,
        })
        .collect()
}

fn parse_count(cell: &str, field: &str) -> Result<u64> {
    let cleaned: String = to_ascii_digits(cell)
        .chars()
        .filter(|c| *c != ',' && *c != '，')
        .collect();

    cleaned.trim().parse::<u64>().map_err(|e| {
        ExpoError::parse_with_source(format!("invalid {} count '{}'", field, cell), e)
    })
}

/// Turn one data row into a record.
///
/// Checks run in a fixed order: rows with fewer than 4 cells and summary rows
/// are skipped, then both counts must parse (a bad count is an error that
/// abandons the whole article), and only then is a row without a
/// `<m>月<d>日` date skipped. Cell 2 is never read.
pub fn parse_row(cells: &[String], year: i32, summary_marker: &str) -> Result<Option<RawRecord>> {
    if cells.len() < 4 {
        return Ok(None);
    }

    let date_cell = cells[0].as_str();
    if date_cell.contains(summary_marker) {
        return Ok(None);
    }

    let visitors = parse_count(&cells[1], "visitor")?;
    let pass_holders = parse_count(&cells[3], "pass holder")?;

    let Some(caps) = MONTH_DAY.captures(date_cell) else {
        return Ok(None);
    };

    let month: u32 = to_ascii_digits(&caps[1])
        .parse()
        .map_err(|e| ExpoError::parse_with_source(format!("invalid month in '{}'", date_cell), e))?;
    let day: u32 = to_ascii_digits(&caps[2])
        .parse()
        .map_err(|e| ExpoError::parse_with_source(format!("invalid day in '{}'", date_cell), e))?;

    Ok(Some(RawRecord {
        date: format!("{}-{:02}-{:02}", year, month, day),
        visitors,
        pass_holders,
    }))
}
