//! Year-by-year cash-flow projection

use super::cashflows::{CumulativePoint, YearRow, YearlySummary};
use super::config::ProjectionConfig;
use super::state::YearState;
use crate::finance::{irr_or_none, npv, pmt};

/// Build the yearly projection for `config`.
///
/// Emits the year-0 outlay row followed by one row per contract year, then
/// derives the cumulative series, payback year, NPV and IRR from the net
/// column. Every call recomputes from scratch.
pub fn build_yearly_projection(config: &ProjectionConfig) -> YearlySummary {
    let capex_total = config.capex_total();
    let upfront = config.upfront();
    let loan_amount = config.loan_amount();

    let loan_periods = config.loan_periods();
    let emi_annual = if loan_periods == 0 {
        0.0
    } else {
        pmt(config.loan_interest_pct / 100.0, loan_periods, loan_amount)
    };

    let contract_years = config.contract_years.max(0) as u32;
    let mut rows = Vec::with_capacity(contract_years as usize + 1);
    rows.push(YearRow::upfront(upfront));

    let mut state = YearState::from_config(config);
    for _ in 0..contract_years {
        state.advance_year(config);
        rows.push(project_year(&state, emi_annual, loan_periods));
    }

    let cumulative = cumulative_series(&rows);
    let payback_year = payback_year(&cumulative);

    let nets: Vec<f64> = rows.iter().map(|r| r.net).collect();
    let npv = npv(config.discount_rate_pct / 100.0, &nets);
    let irr = irr_or_none(&nets);

    let (year1_gen, year1_revenue) = rows
        .get(1)
        .map(|r| (r.generation_kwh, r.revenue))
        .unwrap_or_else(|| {
            let gen = config.year1_generation().round() as i64;
            (gen, gen as f64 * config.ppa_tariff)
        });

    log::debug!(
        "yearly projection: {} years, capex {:.2}, emi {:.2} over {} years, npv {:.2}, irr {:?}, payback {:?}",
        contract_years,
        capex_total,
        emi_annual,
        loan_periods,
        npv,
        irr,
        payback_year
    );

    YearlySummary {
        capex_total,
        upfront,
        loan_amount,
        year1_gen,
        year1_revenue,
        emi_annual,
        payback_year,
        npv,
        irr,
        cumulative,
        rows,
    }
}

/// Cash flows for the year `state` has just advanced to
fn project_year(state: &YearState, emi_annual: f64, loan_periods: u32) -> YearRow {
    let generation_kwh = state.generation_kwh();
    let revenue = generation_kwh as f64 * state.tariff;
    let emi = if state.year <= loan_periods {
        emi_annual
    } else {
        0.0
    };

    YearRow {
        year: state.year,
        generation_kwh,
        tariff: state.tariff,
        revenue,
        omr: state.omr,
        emi,
        net: revenue - state.omr + emi,
    }
}

/// Running totals of `net`, one point per row
pub fn cumulative_series(rows: &[YearRow]) -> Vec<CumulativePoint> {
    rows.iter()
        .scan(0.0, |running, row| {
            *running += row.net;
            Some(CumulativePoint {
                year: row.year,
                value: *running,
            })
        })
        .collect()
}

/// First year at which the running total is no longer negative
pub fn payback_year(cumulative: &[CumulativePoint]) -> Option<u32> {
    cumulative.iter().find(|c| c.value >= 0.0).map(|c| c.year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_config() -> ProjectionConfig {
        ProjectionConfig {
            capacity_kw: 50.0,
            units_per_kw_day: 4.2,
            contract_years: 20,
            ppa_tariff: 5.0,
            capex_per_kw: 42_000.0,
            upfront_percent: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_scenario_headline_figures() {
        let summary = build_yearly_projection(&reference_config());

        assert_relative_eq!(summary.capex_total, 2_100_000.0);
        assert_relative_eq!(summary.upfront, 420_000.0);
        assert_relative_eq!(summary.loan_amount, 1_680_000.0);
        assert_eq!(summary.year1_gen, 76_650);
        assert_relative_eq!(summary.year1_revenue, 383_250.0);
        assert_eq!(summary.rows.len(), 21);
    }

    #[test]
    fn test_year_zero_row_is_upfront_outlay() {
        let config = ProjectionConfig {
            upfront_percent: 35.0,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);
        let year0 = &summary.rows[0];

        let expected_upfront = 0.35 * config.capacity_kw * config.capex_per_kw;
        assert_relative_eq!(summary.upfront, expected_upfront);
        assert_relative_eq!(year0.net, -expected_upfront);
        assert_eq!(year0.year, 0);
        assert_eq!(year0.generation_kwh, 0);
        assert_eq!(year0.tariff, 0.0);
        assert_eq!(year0.revenue, 0.0);
        assert_eq!(year0.omr, 0.0);
        assert_eq!(year0.emi, 0.0);
    }

    #[test]
    fn test_rows_indexed_by_year() {
        let summary = build_yearly_projection(&reference_config());
        for (i, row) in summary.rows.iter().enumerate() {
            assert_eq!(row.year as usize, i);
        }
    }

    #[test]
    fn test_escalation_from_year_two() {
        let config = reference_config();
        let summary = build_yearly_projection(&config);
        let rows = &summary.rows;

        assert_relative_eq!(rows[1].tariff, config.ppa_tariff);
        assert_relative_eq!(rows[1].omr, config.omr_per_kw_year * config.capacity_kw);

        let tariff_step = 1.0 + config.tariff_escalation_pct / 100.0;
        let omr_step = 1.0 + config.omr_escalation_pct / 100.0;
        let decay = 1.0 - config.degradation_pct / 100.0;

        for y in 2..rows.len() {
            assert_relative_eq!(rows[y].tariff, rows[y - 1].tariff * tariff_step, max_relative = 1e-12);
            assert_relative_eq!(rows[y].omr, rows[y - 1].omr * omr_step, max_relative = 1e-12);

            // Generation is rounded per row, so allow a kWh either way
            let expected = rows[y - 1].generation_kwh as f64 * decay;
            assert_abs_diff_eq!(rows[y].generation_kwh as f64, expected, epsilon = 1.0);
        }
    }

    #[test]
    fn test_revenue_and_net_per_row() {
        let summary = build_yearly_projection(&reference_config());
        for row in summary.rows.iter().skip(1) {
            assert_relative_eq!(row.revenue, row.generation_kwh as f64 * row.tariff);
            assert_relative_eq!(row.net, row.revenue - row.omr + row.emi);
        }
    }

    #[test]
    fn test_loan_window() {
        let config = ProjectionConfig {
            loan_tenure_years: 7,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);

        assert!(summary.emi_annual < 0.0);
        for row in &summary.rows {
            if (1..=7).contains(&row.year) {
                assert_eq!(row.emi, summary.emi_annual);
            } else {
                assert_eq!(row.emi, 0.0);
            }
        }
    }

    #[test]
    fn test_loan_tenure_longer_than_contract() {
        let config = ProjectionConfig {
            contract_years: 5,
            loan_tenure_years: 15,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);

        // Amortized over the five contract years, not fifteen
        let expected = pmt(config.loan_interest_pct / 100.0, 5, summary.loan_amount);
        assert_relative_eq!(summary.emi_annual, expected);
        assert!(summary.rows.iter().skip(1).all(|r| r.emi == expected));
    }

    #[test]
    fn test_zero_tenure_means_no_installment() {
        let config = ProjectionConfig {
            loan_tenure_years: 0,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);

        assert_eq!(summary.emi_annual, 0.0);
        assert!(summary.rows.iter().all(|r| r.emi == 0.0));
    }

    #[test]
    fn test_zero_interest_loan() {
        let config = ProjectionConfig {
            loan_interest_pct: 0.0,
            loan_tenure_years: 10,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);
        assert_relative_eq!(summary.emi_annual, -summary.loan_amount / 10.0);
    }

    #[test]
    fn test_fully_equity_funded() {
        let config = ProjectionConfig {
            upfront_percent: 100.0,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);

        assert_eq!(summary.loan_amount, 0.0);
        assert_eq!(summary.emi_annual, 0.0);
        assert_relative_eq!(summary.rows[0].net, -summary.capex_total);
    }

    #[test]
    fn test_zero_upfront_pays_back_immediately() {
        let config = ProjectionConfig {
            upfront_percent: 0.0,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);

        assert_eq!(summary.upfront, 0.0);
        assert_eq!(summary.payback_year, Some(0));
    }

    #[test]
    fn test_cumulative_matches_running_sum() {
        let summary = build_yearly_projection(&reference_config());
        assert_eq!(summary.cumulative.len(), summary.rows.len());

        for (i, point) in summary.cumulative.iter().enumerate() {
            let expected: f64 = summary.rows[..=i].iter().map(|r| r.net).sum();
            assert_eq!(point.year, summary.rows[i].year);
            assert_relative_eq!(point.value, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_payback_is_first_non_negative_cumulative() {
        let summary = build_yearly_projection(&reference_config());
        let year = summary.payback_year.expect("reference plant pays back within term") as usize;

        assert!(summary.cumulative[year].value >= 0.0);
        assert!(summary.cumulative[..year].iter().all(|c| c.value < 0.0));
    }

    #[test]
    fn test_payback_beyond_term() {
        let config = ProjectionConfig {
            contract_years: 5,
            ppa_tariff: 1.0,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);

        assert_eq!(summary.payback_year, None);
        assert!(summary.cumulative.iter().all(|c| c.value < 0.0));
    }

    #[test]
    fn test_irr_unavailable_without_sign_change() {
        // Debt service outweighs revenue every year, so every net flow is negative
        let config = ProjectionConfig {
            contract_years: 5,
            ppa_tariff: 1.0,
            ..reference_config()
        };
        let summary = build_yearly_projection(&config);

        assert!(summary.rows.iter().all(|r| r.net < 0.0));
        assert!(summary.irr.is_none());
        assert_eq!(summary.metrics().irr, None);
        assert!(summary.npv.is_finite());
    }

    #[test]
    fn test_npv_and_irr_from_net_column() {
        let config = reference_config();
        let summary = build_yearly_projection(&config);
        let nets = summary.net_cashflows();

        assert_relative_eq!(summary.npv, npv(config.discount_rate_pct / 100.0, &nets));

        let irr = summary.irr.expect("conventional cash flows have an IRR");
        assert!(irr > 0.0);
        assert_abs_diff_eq!(npv(irr, &nets), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_non_positive_contract_leaves_year_zero_only() {
        for years in [0, -4] {
            let config = ProjectionConfig {
                contract_years: years,
                ..reference_config()
            };
            let summary = build_yearly_projection(&config);

            assert_eq!(summary.rows.len(), 1);
            assert_eq!(summary.cumulative.len(), 1);
            assert_eq!(summary.emi_annual, 0.0);
            assert_eq!(summary.payback_year, None);
            assert_relative_eq!(summary.npv, -summary.upfront);
            // Year-1 headline figures still describe the plant
            assert_eq!(summary.year1_gen, 76_650);
        }
    }

    #[test]
    fn test_builds_are_independent() {
        let config = reference_config();
        let first = build_yearly_projection(&config);
        let second = build_yearly_projection(&config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_metrics_totals() {
        let summary = build_yearly_projection(&reference_config());
        let metrics = summary.metrics();

        assert_eq!(metrics.contract_years, 20);
        let gen: i64 = summary.rows.iter().map(|r| r.generation_kwh).sum();
        assert_eq!(metrics.total_generation_kwh, gen);
        assert_relative_eq!(metrics.total_debt_service, summary.emi_annual * 10.0, max_relative = 1e-12);
        assert_relative_eq!(
            metrics.final_cumulative,
            summary.cumulative.last().unwrap().value
        );
        assert_relative_eq!(metrics.total_net, metrics.final_cumulative, max_relative = 1e-12);
    }
}
