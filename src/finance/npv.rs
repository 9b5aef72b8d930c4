//! Net present value of a periodic cash-flow series

/// Net present value of `cashflows` at `discount_rate` per period.
///
/// `cashflows[0]` is period 0 and is not discounted; `cashflows[t]` is divided
/// by `(1 + discount_rate)^t`.
pub fn npv(discount_rate: f64, cashflows: &[f64]) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + discount_rate).powi(t as i32))
        .sum()
}

/// NPV and its derivative with respect to the rate, evaluated in one pass
pub fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut slope = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        value += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            slope -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (value, slope)
}
