use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::debug;

use crate::error::{MortgageError, MortgageResult};
use crate::frequency::{Frequency, resolve};
use crate::types::Rate;

/// Converts a nominal annual rate compounded `compounding` times a year into the
/// effective rate for one payment period when payments occur `payment` times a
/// year.
///
/// effective = (1 + i / c)^(c / f) - 1
///
/// A zero nominal rate yields exactly zero.
pub fn interest_rate_per_payment_frequency<C, P>(
    annual_interest_rate: Rate,
    compounding: C,
    payment: P,
) -> MortgageResult<Rate>
where
    C: TryInto<Frequency>,
    P: TryInto<Frequency>,
    MortgageError: From<C::Error> + From<P::Error>,
{
    let compounding = resolve(compounding)?;
    let payment = resolve(payment)?;

    let c = Decimal::from(compounding.periods_per_year());
    let f = Decimal::from(payment.periods_per_year());

    let base = Decimal::ONE + annual_interest_rate / c;
    let exponent = c / f;

    let rate = lossy_pow(base, exponent)? - Decimal::ONE;

    debug!(
        %annual_interest_rate,
        %compounding,
        %payment,
        %rate,
        "converted nominal rate to periodic rate"
    );

    Ok(rate)
}

/// Raises `base` to a fractional `exponent` through `f64`.
///
/// This is the single place the engine leaves decimal arithmetic, and the
/// result carries `f64` rounding error.
pub fn lossy_pow(base: Decimal, exponent: Decimal) -> MortgageResult<Decimal> {
    if exponent.is_zero() || base == Decimal::ONE {
        return Ok(Decimal::ONE);
    }
    if exponent == Decimal::ONE {
        return Ok(base);
    }

    let fault = || MortgageError::NumericFault {
        context: format!("fractional power {base}^{exponent}"),
    };

    let base_f = base.to_f64().ok_or_else(fault)?;
    let exponent_f = exponent.to_f64().ok_or_else(fault)?;
    let result = base_f.powf(exponent_f);

    if !result.is_finite() {
        return Err(fault());
    }

    Decimal::from_f64(result).ok_or_else(fault)
}
