//! Monthly expansion of a yearly projection
//!
//! Each contract year is split into twelve equal shares. There is no
//! seasonal profile.

use serde::{Deserialize, Serialize};

use super::cashflows::{YearRow, YearlySummary};

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month column for the year-0 outlay row
pub const YEAR_ZERO_MONTH: &str = "-";

/// One month of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Unique id, `Y{year}-{month number:02}`; year 0 uses month `00`
    pub key: String,
    /// `Y{year}`
    pub label: String,
    pub month: String,
    pub generation_kwh: i64,
    /// The year's tariff, identical for all twelve months
    pub tariff: f64,
    pub revenue: f64,
    pub omr: f64,
    /// Share of the annual installment, `<= 0`
    pub emi: f64,
    pub net: f64,
}

impl MonthRow {
    fn year_zero(row: &YearRow) -> Self {
        Self {
            key: format!("Y{}-00", row.year),
            label: format!("Y{}", row.year),
            month: YEAR_ZERO_MONTH.to_string(),
            generation_kwh: 0,
            tariff: 0.0,
            revenue: 0.0,
            omr: 0.0,
            emi: 0.0,
            net: row.net,
        }
    }

    fn share_of(row: &YearRow, month_index: usize) -> Self {
        Self {
            key: format!("Y{}-{:02}", row.year, month_index + 1),
            label: format!("Y{}", row.year),
            month: MONTH_NAMES[month_index].to_string(),
            generation_kwh: (row.generation_kwh as f64 / 12.0).round() as i64,
            tariff: row.tariff,
            revenue: row.revenue / 12.0,
            omr: row.omr / 12.0,
            emi: row.emi / 12.0,
            net: row.net / 12.0,
        }
    }
}

/// Monthly rows with their running net total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub rows: Vec<MonthRow>,
    /// `cumulative[i]` is the sum of `rows[..=i].net`
    pub cumulative: Vec<f64>,
}

/// Expand a yearly projection into monthly rows.
///
/// Year 0 becomes a single placeholder row; every other year becomes twelve
/// rows each holding a twelfth of the year's figures.
pub fn build_monthly_projection(yearly: &YearlySummary) -> MonthlySummary {
    let mut rows = Vec::with_capacity(yearly.rows.len() * 12);

    for year_row in &yearly.rows {
        if year_row.year == 0 {
            rows.push(MonthRow::year_zero(year_row));
        } else {
            rows.extend((0..12).map(|m| MonthRow::share_of(year_row, m)));
        }
    }

    let cumulative = rows
        .iter()
        .scan(0.0, |running, row| {
            *running += row.net;
            Some(*running)
        })
        .collect();

    log::debug!("monthly projection: {} rows", rows.len());

    MonthlySummary { rows, cumulative }
}
