//! Fixed-payment loan installment

/// Level payment that amortizes `present_value` over `periods` at `rate`.
///
/// The result is negative: it is a cash outflow for the borrower. With
/// `rate == 0` the loan is repaid in equal slices of principal.
///
/// `periods` must be at least 1. A zero-period loan is not a loan at all and
/// callers treat it as a zero installment before reaching this function.
pub fn pmt(rate: f64, periods: u32, present_value: f64) -> f64 {
    if rate == 0.0 {
        return -present_value / periods as f64;
    }

    let annuity_factor = 1.0 - (1.0 + rate).powi(-(periods as i32));
    -(present_value * rate) / annuity_factor
}
