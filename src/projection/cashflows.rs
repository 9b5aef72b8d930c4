//! Cashflow output structures for yearly projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one contract year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    /// Contract year; 0 is the synthetic upfront-outlay row
    pub year: u32,

    pub generation_kwh: i64,
    pub tariff: f64,
    pub revenue: f64,
    pub omr: f64,

    /// Loan installment. Always `<= 0`: negative is cash paid out.
    pub emi: f64,

    /// `revenue - omr + emi`, or `-upfront` for year 0
    pub net: f64,
}

impl YearRow {
    /// Year-0 row carrying only the equity outlay
    pub fn upfront(upfront: f64) -> Self {
        Self {
            year: 0,
            generation_kwh: 0,
            tariff: 0.0,
            revenue: 0.0,
            omr: 0.0,
            emi: 0.0,
            net: -upfront,
        }
    }
}

/// Running total of net cash flow up to and including `year`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub year: u32,
    pub value: f64,
}

/// Complete yearly projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub capex_total: f64,
    pub upfront: f64,
    pub loan_amount: f64,
    pub year1_gen: i64,
    pub year1_revenue: f64,

    /// Installment paid in every year of the loan window. Always `<= 0`.
    pub emi_annual: f64,

    /// First year whose cumulative net is non-negative, `None` if beyond the contract
    pub payback_year: Option<u32>,

    pub npv: f64,

    /// `None` when the IRR iteration diverged
    pub irr: Option<f64>,

    /// Running totals of `net`, aligned with `rows`
    pub cumulative: Vec<CumulativePoint>,

    /// Year 0 followed by one row per contract year
    pub rows: Vec<YearRow>,
}

impl YearlySummary {
    /// Net cash flow per year, year 0 first
    pub fn net_cashflows(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.net).collect()
    }

    /// Number of contract years (rows excluding year 0)
    pub fn contract_years(&self) -> u32 {
        self.rows.len().saturating_sub(1) as u32
    }

    /// Headline figures for display
    pub fn metrics(&self) -> KeyMetrics {
        let operating = || self.rows.iter().skip(1);

        KeyMetrics {
            contract_years: self.contract_years(),
            total_generation_kwh: operating().map(|r| r.generation_kwh).sum(),
            total_revenue: operating().map(|r| r.revenue).sum(),
            total_omr: operating().map(|r| r.omr).sum(),
            total_debt_service: operating().map(|r| r.emi).sum(),
            total_net: self.rows.iter().map(|r| r.net).sum(),
            final_cumulative: self.cumulative.last().map(|c| c.value).unwrap_or(0.0),
            npv: self.npv,
            irr: self.irr,
            payback_year: self.payback_year,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub contract_years: u32,
    pub total_generation_kwh: i64,
    pub total_revenue: f64,
    pub total_omr: f64,
    /// Sum of installments, `<= 0`
    pub total_debt_service: f64,
    /// Sum of all net flows including the year-0 outlay
    pub total_net: f64,
    pub final_cumulative: f64,
    pub npv: f64,
    pub irr: Option<f64>,
    pub payback_year: Option<u32>,
}
