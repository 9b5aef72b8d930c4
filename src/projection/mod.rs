//! Yearly and monthly PPA cash-flow projections

mod cashflows;
mod config;
mod monthly;
mod state;
mod yearly;

pub use cashflows::{CumulativePoint, KeyMetrics, YearRow, YearlySummary};
pub use config::ProjectionConfig;
pub use monthly::{build_monthly_projection, MonthRow, MonthlySummary, MONTH_NAMES, YEAR_ZERO_MONTH};
pub use state::YearState;
pub use yearly::{build_yearly_projection, cumulative_series, payback_year};
