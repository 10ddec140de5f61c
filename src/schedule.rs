use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MortgageError, MortgageResult};
use crate::frequency::{Frequency, QuarterStep, resolve};
use crate::types::{Money, Rate};

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Year of the loan, starting at 1.
    pub year: u32,
    /// Payment number inside its year, from 1 to the payment frequency.
    pub period: u32,
    pub payment: Money,
    /// The portion of the payment that covers interest.
    pub interest: Money,
    /// The portion of the payment that reduces the balance.
    pub principal: Money,
    /// Remaining balance after this payment.
    pub balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_paid: Money,
    pub payment_date: NaiveDate,
}

/// Everything the schedule generator needs to unroll a loan.
#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub payment: Money,
    pub periodic_rate: Rate,
    pub principal: Money,
    pub amortization_years: u32,
    pub first_payment_date: NaiveDate,
    pub quarter_step: QuarterStep,
}

/// Unrolls the full amortization schedule, one record per payment period.
///
/// The loop always runs `years * periods_per_year` times. The date is advanced
/// before each record is written, so the first record is dated one step after
/// `first_payment_date`. There is no balloon adjustment: rounding in the rate
/// leaves a tiny residual balance on the last record, and a zero payment simply
/// lets the balance accrue.
pub fn generate_schedule<F>(params: &ScheduleParams, payment_frequency: F) -> MortgageResult<Vec<PeriodRecord>>
where
    F: TryInto<Frequency>,
    MortgageError: From<F::Error>,
{
    let frequency = resolve(payment_frequency)?;
    let periods_per_year = frequency.periods_per_year();
    let capacity = params.amortization_years as usize * periods_per_year as usize;

    let mut balance = params.principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_paid = Decimal::ZERO;
    let mut payment_date = params.first_payment_date;
    let mut schedule = Vec::with_capacity(capacity);

    for year in 1..=params.amortization_years {
        for period in 1..=periods_per_year {
            let overflow = || MortgageError::NumericFault {
                context: format!("schedule year {year} payment {period}"),
            };

            let interest = balance
                .checked_mul(params.periodic_rate)
                .ok_or_else(overflow)?;
            let principal = params.payment.checked_sub(interest).ok_or_else(overflow)?;

            balance = balance.checked_sub(principal).ok_or_else(overflow)?;
            cumulative_interest = cumulative_interest
                .checked_add(interest)
                .ok_or_else(overflow)?;
            cumulative_paid = cumulative_paid
                .checked_add(params.payment)
                .ok_or_else(overflow)?;
            payment_date = frequency.next_date(payment_date, params.quarter_step)?;

            schedule.push(PeriodRecord {
                year,
                period,
                payment: params.payment,
                interest,
                principal,
                balance,
                cumulative_interest,
                cumulative_paid,
                payment_date,
            });
        }
    }

    debug!(
        periods = schedule.len(),
        %frequency,
        final_balance = %balance,
        "generated amortization schedule"
    );

    Ok(schedule)
}
