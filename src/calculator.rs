use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageResult;
use crate::frequency::Frequency;
use crate::loan::LoanTerms;
use crate::payment::{self, mortgage_payment, total_number_of_payments};
use crate::rate::interest_rate_per_payment_frequency;
use crate::schedule::{PeriodRecord, ScheduleParams, generate_schedule};
use crate::types::{Currency, Money, Rate};

/// Computes every derived value of a mortgage from its terms.
///
/// Each method is a pure function of the terms; nothing is cached.
#[derive(Debug, Clone)]
pub struct MortgageCalculator {
    terms: LoanTerms,
}

/// All outputs of a calculation in one serializable value.
///
/// Scalar money fields are rounded to cents. The schedule keeps full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub currency: Currency,
    pub total_amount: Money,
    pub down_payment: Money,
    pub principal: Money,
    pub percent_of_loan_financed: Decimal,
    pub payment_frequency: Frequency,
    pub compounding_frequency: Frequency,
    pub interest_rate_per_payment: Rate,
    pub total_number_of_payments: u32,
    pub payment_per_period: Money,
    pub monthly_payment: Money,
    pub annual_payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub schedule: Vec<PeriodRecord>,
}

impl MortgageCalculator {
    pub fn new(terms: LoanTerms) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn payment_frequency(&self) -> Frequency {
        self.terms.payment_frequency()
    }

    /// Share of the purchase price that is borrowed, as a percentage.
    /// Zero when the total amount is zero.
    pub fn percent_of_loan_financed(&self) -> Decimal {
        let total = self.terms.total_amount();
        if total.is_zero() {
            return Decimal::ZERO;
        }

        self.terms.principal() / total * dec!(100)
    }

    pub fn interest_rate_per_payment_frequency(&self) -> MortgageResult<Rate> {
        interest_rate_per_payment_frequency(
            self.terms.annual_interest_rate(),
            self.terms.compounding_frequency(),
            self.terms.payment_frequency(),
        )
    }

    pub fn total_number_of_payments(&self) -> MortgageResult<u32> {
        total_number_of_payments(self.terms.amortization_years(), self.terms.payment_frequency())
    }

    pub fn payment_per_period(&self) -> MortgageResult<Money> {
        let periodic_rate = self.interest_rate_per_payment_frequency()?;
        let total_payments = self.total_number_of_payments()?;
        mortgage_payment(self.terms.principal(), periodic_rate, total_payments)
    }

    pub fn payment_schedule(&self) -> MortgageResult<Vec<PeriodRecord>> {
        let params = ScheduleParams {
            payment: self.payment_per_period()?,
            periodic_rate: self.interest_rate_per_payment_frequency()?,
            principal: self.terms.principal(),
            amortization_years: self.terms.amortization_years(),
            first_payment_date: self.terms.first_payment_date(),
            quarter_step: self.terms.quarter_step(),
        };

        generate_schedule(&params, self.terms.payment_frequency())
    }

    pub fn monthly_payment(&self) -> MortgageResult<Money> {
        payment::to_monthly(self.payment_per_period()?, self.terms.payment_frequency())
    }

    pub fn annual_payment(&self) -> MortgageResult<Money> {
        payment::to_annual(self.payment_per_period()?, self.terms.payment_frequency())
    }

    pub fn summary(&self) -> MortgageResult<MortgageSummary> {
        let payment_per_period = self.payment_per_period()?;
        let schedule = self.payment_schedule()?;

        let (total_interest, total_paid) = schedule
            .last()
            .map(|record| (record.cumulative_interest, record.cumulative_paid))
            .unwrap_or_default();

        Ok(MortgageSummary {
            currency: self.terms.currency().clone(),
            total_amount: self.terms.total_amount(),
            down_payment: self.terms.down_payment(),
            principal: self.terms.principal(),
            percent_of_loan_financed: self.percent_of_loan_financed().round_dp(2),
            payment_frequency: self.terms.payment_frequency(),
            compounding_frequency: self.terms.compounding_frequency(),
            interest_rate_per_payment: self.interest_rate_per_payment_frequency()?,
            total_number_of_payments: self.total_number_of_payments()?,
            payment_per_period: payment_per_period.round_dp(2),
            monthly_payment: payment::to_monthly(payment_per_period, self.terms.payment_frequency())?.round_dp(2),
            annual_payment: payment::to_annual(payment_per_period, self.terms.payment_frequency())?.round_dp(2),
            total_interest: total_interest.round_dp(2),
            total_paid: total_paid.round_dp(2),
            schedule,
        })
    }
}

impl From<LoanTerms> for MortgageCalculator {
    fn from(terms: LoanTerms) -> Self {
        Self::new(terms)
    }
}
