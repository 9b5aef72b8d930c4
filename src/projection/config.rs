//! Input parameters for a PPA projection

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PpaError;

/// Plant, tariff, financing and O&M parameters for one projection run.
///
/// Percentages are given as percent (9.0 for 9%). Nothing here is range
/// checked; the builders compute whatever the formulas yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Installed capacity (kW)
    pub capacity_kw: f64,

    /// Daily energy yield per kW (kWh/kW/day)
    pub units_per_kw_day: f64,

    /// Annual generation decay (%)
    pub degradation_pct: f64,

    /// Contract horizon in years; zero or negative leaves only year 0
    pub contract_years: i32,

    /// Year-1 tariff (currency per kWh)
    pub ppa_tariff: f64,

    /// Annual tariff escalation (%)
    pub tariff_escalation_pct: f64,

    /// Capital cost per kW
    pub capex_per_kw: f64,

    /// Equity share of capex (%), the rest is financed
    pub upfront_percent: f64,

    /// Annual loan interest (%)
    pub loan_interest_pct: f64,

    /// Loan tenure in years
    pub loan_tenure_years: i32,

    /// Year-1 O&M cost per kW
    pub omr_per_kw_year: f64,

    /// Annual O&M escalation (%)
    pub omr_escalation_pct: f64,

    /// Discount rate used for NPV (%)
    pub discount_rate_pct: f64,
}

impl Default for ProjectionConfig {
    /// Reference 50 kW rooftop PPA
    fn default() -> Self {
        Self {
            capacity_kw: 50.0,
            units_per_kw_day: 4.2,
            degradation_pct: 0.5,
            contract_years: 20,
            ppa_tariff: 5.0,
            tariff_escalation_pct: 2.0,
            capex_per_kw: 42_000.0,
            upfront_percent: 20.0,
            loan_interest_pct: 9.0,
            loan_tenure_years: 10,
            omr_per_kw_year: 600.0,
            omr_escalation_pct: 3.0,
            discount_rate_pct: 10.0,
        }
    }
}

impl ProjectionConfig {
    /// Load a config from a JSON file. Missing fields take their default.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, PpaError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PpaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a config from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, PpaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Total capital cost
    pub fn capex_total(&self) -> f64 {
        self.capacity_kw * self.capex_per_kw
    }

    /// Equity paid at year 0
    pub fn upfront(&self) -> f64 {
        self.capex_total() * self.upfront_percent / 100.0
    }

    /// Financed part of capex
    pub fn loan_amount(&self) -> f64 {
        self.capex_total() - self.upfront()
    }

    /// Number of years carrying a loan installment: `min(contract, tenure)`, floored at 0
    pub fn loan_periods(&self) -> u32 {
        self.contract_years.min(self.loan_tenure_years).max(0) as u32
    }

    /// Unrounded year-1 generation (kWh)
    pub fn year1_generation(&self) -> f64 {
        self.capacity_kw * self.units_per_kw_day * 365.0
    }

    /// Year-1 O&M cost
    pub fn year1_omr(&self) -> f64 {
        self.omr_per_kw_year * self.capacity_kw
    }
}
