use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::error::{MortgageError, MortgageResult};
use crate::frequency::{Frequency, resolve};
use crate::types::{Money, Rate};

/// Number of payments over the whole term: `years * periods_per_year`.
pub fn total_number_of_payments<F>(amortization_years: u32, payment_frequency: F) -> MortgageResult<u32>
where
    F: TryInto<Frequency>,
    MortgageError: From<F::Error>,
{
    let frequency = resolve(payment_frequency)?;

    amortization_years
        .checked_mul(frequency.periods_per_year())
        .ok_or_else(|| MortgageError::NumericFault {
            context: format!("{amortization_years} years of {frequency} payments"),
        })
}

/// Level payment per period for a fixed-rate loan.
///
/// PMT = P * [r(1 + r)^n] / [(1 + r)^n - 1]
///
/// When the denominator is zero (a zero rate, or no payments at all) there is
/// no amortized payment to compute and zero is returned instead of an error.
pub fn mortgage_payment(principal: Money, periodic_rate: Rate, total_payments: u32) -> MortgageResult<Money> {
    let overflow = |step: &str| MortgageError::NumericFault {
        context: format!("payment formula ({step}) for rate {periodic_rate} over {total_payments} periods"),
    };

    let r_plus_1_pow_n = (Decimal::ONE + periodic_rate)
        .checked_powu(total_payments.into())
        .ok_or_else(|| overflow("(1 + r)^n"))?;

    let denominator = r_plus_1_pow_n - Decimal::ONE;
    if denominator.is_zero() {
        warn!(%periodic_rate, total_payments, "payment formula denominator is zero, returning zero payment");
        return Ok(Decimal::ZERO);
    }

    let numerator = periodic_rate
        .checked_mul(r_plus_1_pow_n)
        .ok_or_else(|| overflow("r(1 + r)^n"))?;
    let payment = numerator
        .checked_div(denominator)
        .and_then(|factor| factor.checked_mul(principal))
        .ok_or_else(|| overflow("annuity factor"))?;

    debug!(%principal, %periodic_rate, total_payments, %payment, "solved level payment");

    Ok(payment)
}

/// Expresses a per-period payment as the equivalent monthly amount.
pub fn to_monthly<F>(payment: Money, payment_frequency: F) -> MortgageResult<Money>
where
    F: TryInto<Frequency>,
    MortgageError: From<F::Error>,
{
    let monthly = match resolve(payment_frequency)? {
        Frequency::Annual => payment / dec!(12),
        Frequency::SemiAnnual => payment / dec!(6),
        Frequency::Quarter => payment / dec!(3),
        Frequency::BiMonth => payment / dec!(2),
        Frequency::Month => payment,
        Frequency::BiWeek => payment * dec!(26) / dec!(12),
        Frequency::Week => payment * dec!(52) / dec!(12),
    };

    Ok(monthly)
}

/// Expresses a per-period payment as the total paid in one year.
pub fn to_annual<F>(payment: Money, payment_frequency: F) -> MortgageResult<Money>
where
    F: TryInto<Frequency>,
    MortgageError: From<F::Error>,
{
    let frequency = resolve(payment_frequency)?;
    Ok(payment * Decimal::from(frequency.periods_per_year()))
}
