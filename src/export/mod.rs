//! Flattening projection rows into tables for export
//!
//! Callers pick the columns; rows answer with their formatted field values
//! in that order.

mod csv_out;

pub use csv_out::{export_csv, write_csv, write_json};

use crate::error::PpaError;
use crate::projection::{MonthRow, YearRow};

/// A projection row that can be rendered as named, formatted fields
pub trait TableRow {
    /// Every column this row type can produce
    const COLUMNS: &'static [&'static str];

    /// Formatted value of `column`, or `None` if the column is unknown
    fn field(&self, column: &str) -> Option<String>;
}

impl TableRow for YearRow {
    const COLUMNS: &'static [&'static str] =
        &["Year", "Generation (kWh)", "Tariff", "Revenue", "O&M", "EMI", "Net"];

    fn field(&self, column: &str) -> Option<String> {
        let value = match column {
            "Year" => self.year.to_string(),
            "Generation (kWh)" => self.generation_kwh.to_string(),
            "Tariff" => format!("{:.4}", self.tariff),
            "Revenue" => format!("{:.2}", self.revenue),
            "O&M" => format!("{:.2}", self.omr),
            "EMI" => format!("{:.2}", self.emi),
            "Net" => format!("{:.2}", self.net),
            _ => return None,
        };
        Some(value)
    }
}

impl TableRow for MonthRow {
    const COLUMNS: &'static [&'static str] = &[
        "Key",
        "Year",
        "Month",
        "Generation (kWh)",
        "Tariff",
        "Revenue",
        "O&M",
        "EMI",
        "Net",
    ];

    fn field(&self, column: &str) -> Option<String> {
        let value = match column {
            "Key" => self.key.clone(),
            "Year" => self.label.clone(),
            "Month" => self.month.clone(),
            "Generation (kWh)" => self.generation_kwh.to_string(),
            "Tariff" => format!("{:.4}", self.tariff),
            "Revenue" => format!("{:.2}", self.revenue),
            "O&M" => format!("{:.2}", self.omr),
            "EMI" => format!("{:.2}", self.emi),
            "Net" => format!("{:.2}", self.net),
            _ => return None,
        };
        Some(value)
    }
}

/// Flatten `rows` into field sequences ordered like `headers`.
///
/// # Errors
///
/// Returns [`PpaError::UnknownColumn`] for a header the row type cannot produce.
pub fn flatten_rows<R: TableRow>(rows: &[R], headers: &[&str]) -> Result<Vec<Vec<String>>, PpaError> {
    if let Some(bad) = headers.iter().find(|h| !R::COLUMNS.iter().any(|c| c == *h)) {
        return Err(PpaError::UnknownColumn {
            column: bad.to_string(),
            available: R::COLUMNS.join(", "),
        });
    }

    Ok(rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.field(h).unwrap_or_default())
                .collect()
        })
        .collect())
}
