//! Attendance table extraction

use expo_common::{ExpoError, Result};
use scraper::{ElementRef, Html, Selector};

/// Selectors for the attendance table inside an article.
#[derive(Debug, Clone)]
pub struct TableSelector {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl TableSelector {
    /// Match the first `<table>` carrying `class`
    pub fn new(class: &str) -> Result<Self> {
        let table = Selector::parse(&format!("table.{}", class))
            .map_err(|e| ExpoError::config(format!("Invalid table class '{}': {}", class, e)))?;
        let row = Selector::parse("tr").map_err(|e| ExpoError::config(e.to_string()))?;
        let cell = Selector::parse("td").map_err(|e| ExpoError::config(e.to_string()))?;

        Ok(Self { table, row, cell })
    }

    /// Cell texts of every row after the header row, or `None` when the
    /// article has no attendance table.
    pub fn extract_rows(&self, html: &str) -> Option<Vec<Vec<String>>> {
        let document = Html::parse_document(html);
        let table = document.select(&self.table).next()?;

        let rows = table
            .select(&self.row)
            .skip(1)
            .map(|row| row.select(&self.cell).map(cell_text).collect())
            .collect();

        Some(rows)
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect::<String>()
}
