//! Solar PPA - cash-flow projection engine for solar power-purchase agreements
//!
//! This library provides:
//! - Year-by-year projections of generation, revenue, O&M and debt service
//! - Monthly expansion of a yearly projection
//! - NPV, IRR (Newton-Raphson) and loan installment primitives
//! - Parallel scenario and tariff sweeps
//! - CSV/JSON export of projection tables

pub mod error;
pub mod export;
pub mod finance;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::PpaError;
pub use projection::{
    build_monthly_projection, build_yearly_projection, MonthRow, MonthlySummary,
    ProjectionConfig, YearRow, YearlySummary,
};
pub use scenario::{ScenarioResult, ScenarioRunner, SweepPoint};
