//! The five closed-form financial functions.
//!
//! Rates are decimals (0.05 for 5%), not percentages; the unit normalizer
//! performs that conversion before these run.

use crate::CalcError;

/// Present value: `fv / (1 + rate)^n_periods`.
pub fn present_value(fv: f64, rate: f64, n_periods: f64) -> f64 {
    fv / (1.0 + rate).powf(n_periods)
}

/// Future value: `pv * (1 + rate)^n_periods`.
pub fn future_value(pv: f64, rate: f64, n_periods: f64) -> f64 {
    pv * (1.0 + rate).powf(n_periods)
}

/// Simple interest earned: `principal * rate * time`.
pub fn simple_interest(principal: f64, rate: f64, time: f64) -> f64 {
    principal * rate * time
}

/// Future value under periodic compounding.
///
/// `principal * (1 + annual_rate / m)^(m * years)` with
/// `m = times_compounded_per_year`.
pub fn compound_interest(
    principal: f64,
    annual_rate: f64,
    times_compounded_per_year: f64,
    years: f64,
) -> Result<f64, CalcError> {
    if times_compounded_per_year <= 0.0 {
        return Err(CalcError::Domain(
            "Number of times compounded per year must be greater than 0.".to_string(),
        ));
    }
    let rate_per_period = annual_rate / times_compounded_per_year;
    let n_periods = times_compounded_per_year * years;
    Ok(principal * (1.0 + rate_per_period).powf(n_periods))
}

/// Monthly payment on an amortizing loan.
///
/// Standard formula `P * r * (1 + r)^n / [(1 + r)^n - 1]` with
/// `r = annual_rate / 12` and `n = n_months`. A zero rate degenerates to
/// straight division.
pub fn loan_amortization_payment(
    principal: f64,
    annual_rate: f64,
    n_months: f64,
) -> Result<f64, CalcError> {
    if n_months <= 0.0 {
        return Err(CalcError::Domain(
            "Number of months must be greater than 0.".to_string(),
        ));
    }
    if annual_rate < 0.0 {
        return Err(CalcError::Domain(
            "Annual rate cannot be negative.".to_string(),
        ));
    }
    if annual_rate == 0.0 {
        return Ok(principal / n_months);
    }

    let monthly_rate = annual_rate / 12.0;
    let one_plus_r_n = (1.0 + monthly_rate).powf(n_months);
    Ok(principal * (monthly_rate * one_plus_r_n) / (one_plus_r_n - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn test_future_value_basic() {
        // $1000 at 5% for 10 periods ≈ 1628.89
        let fv = future_value(1000.0, 0.05, 10.0);
        assert!((fv - 1628.894627).abs() < 1e-4, "fv was {fv}");
    }

    #[test]
    fn test_present_value_inverts_future_value() {
        for (pv, rate, n) in [(1000.0, 0.05, 10.0), (2500.0, 0.0, 7.0), (99.5, 0.12, 30.0)] {
            let round_trip = present_value(future_value(pv, rate, n), rate, n);
            assert!((round_trip - pv).abs() < TOLERANCE, "round trip was {round_trip}");
        }
    }

    #[test]
    fn test_simple_interest() {
        // $1000 at 5% for 3 years = $150
        let interest = simple_interest(1000.0, 0.05, 3.0);
        assert!((interest - 150.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_compound_interest_annual_equals_future_value() {
        // Compounded once per year reduces to plain future value.
        for (p, r, y) in [(1000.0, 0.05, 10.0), (500.0, 0.2, 3.0)] {
            let compound = compound_interest(p, r, 1.0, y).unwrap();
            let fv = future_value(p, r, y);
            assert!((compound - fv).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_compound_interest_quarterly() {
        // $1000 at 8% compounded quarterly for 5 years ≈ 1485.95
        let amount = compound_interest(1000.0, 0.08, 4.0, 5.0).unwrap();
        assert!((amount - 1485.947396).abs() < 1e-4, "amount was {amount}");
    }

    #[test]
    fn test_compound_interest_rejects_zero_frequency() {
        assert!(matches!(
            compound_interest(1000.0, 0.05, 0.0, 10.0),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_loan_payment_basic() {
        // $100,000 at 12% annual for 12 months: EMI ≈ 8884.88
        let payment = loan_amortization_payment(100000.0, 0.12, 12.0).unwrap();
        assert!((payment - 8884.88).abs() < 1.0, "payment was {payment}");
    }

    #[test]
    fn test_loan_payment_zero_rate() {
        let payment = loan_amortization_payment(12000.0, 0.0, 24.0).unwrap();
        assert!((payment - 500.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_loan_payment_rejects_bad_domain() {
        assert!(matches!(
            loan_amortization_payment(1000.0, 0.05, 0.0),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            loan_amortization_payment(1000.0, -0.01, 12.0),
            Err(CalcError::Domain(_))
        ));
    }
}
