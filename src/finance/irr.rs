//! Internal Rate of Return (IRR) calculation
//!
//! Plain Newton-Raphson on the NPV function with no
//! bisection fallback. A poor starting guess or an unusual sign pattern may
//! land on a non-economic root or diverge, and divergence is reported as a
//! non-finite rate.

use super::npv::npv_and_derivative;

/// Starting rate for the Newton-Raphson iteration
pub const DEFAULT_IRR_GUESS: f64 = 0.15;

/// Iteration cap
pub const IRR_MAX_ITERATIONS: usize = 100;

/// Iteration stops once a Newton step is smaller than this
pub const IRR_TOLERANCE: f64 = 1e-8;

/// Calculate the Internal Rate of Return of a periodic cash-flow series
/// using the Newton-Raphson method.
///
/// # Arguments
/// * `cashflows` - Cash flows starting at period 0 (positive = inflow, negative = outflow)
/// * `initial_guess` - Starting rate, normally [`DEFAULT_IRR_GUESS`]
///
/// # Returns
/// * `f64` - Per-period rate as a decimal. A non-finite value means the
///   iteration diverged and there is no usable solution.
///
/// After [`IRR_MAX_ITERATIONS`] steps the last iterate is returned as is,
/// converged or not.
pub fn irr(cashflows: &[f64], initial_guess: f64) -> f64 {
    let mut rate = initial_guess;

    for _ in 0..IRR_MAX_ITERATIONS {
        let (value, slope) = npv_and_derivative(cashflows, rate);
        let step = value / slope;
        rate -= step;

        if !rate.is_finite() || step.abs() < IRR_TOLERANCE {
            break;
        }
    }

    rate
}

/// IRR from [`DEFAULT_IRR_GUESS`], with divergence mapped to `None`
pub fn irr_or_none(cashflows: &[f64]) -> Option<f64> {
    let rate = irr(cashflows, DEFAULT_IRR_GUESS);
    if rate.is_finite() {
        Some(rate)
    } else {
        log::warn!(
            "IRR did not converge over {} cash flows (last iterate {})",
            cashflows.len(),
            rate
        );
        None
    }
}
