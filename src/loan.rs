use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MortgageError, MortgageResult};
use crate::frequency::{Frequency, QuarterStep};
use crate::types::{Currency, Money, Rate};

/// Date format accepted for the first payment date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input parameters for a mortgage calculation, as they arrive from a caller
/// or a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// The purchase price of the property.
    pub total_amount: Money,
    /// The amount paid up front.
    pub down_payment: Money,
    /// The amortization term in whole years.
    pub amortization_years: u32,
    /// The nominal annual interest rate as a decimal fraction (e.g., 0.04 for 4%).
    pub annual_interest_rate: Rate,
    pub payment_frequency: Frequency,
    pub compounding_frequency: Frequency,
    /// ISO 8601 date, `YYYY-MM-DD`.
    pub first_payment_date: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub quarter_step: QuarterStep,
}

/// Validated, immutable loan terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanTerms {
    total_amount: Money,
    down_payment: Money,
    principal: Money,
    amortization_years: u32,
    annual_interest_rate: Rate,
    payment_frequency: Frequency,
    compounding_frequency: Frequency,
    first_payment_date: NaiveDate,
    currency: Currency,
    quarter_step: QuarterStep,
}

impl LoanTerms {
    /// Builds loan terms from already-parsed values.
    ///
    /// The principal is `total_amount - down_payment`. A down payment larger
    /// than the total is accepted and yields a negative principal.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        total_amount: Money,
        down_payment: Money,
        amortization_years: u32,
        annual_interest_rate: Rate,
        payment_frequency: Frequency,
        compounding_frequency: Frequency,
        first_payment_date: NaiveDate,
        currency: Currency,
    ) -> Self {
        let principal = total_amount - down_payment;
        if principal < Money::ZERO {
            warn!(%total_amount, %down_payment, "down payment exceeds total amount, principal is negative");
        }

        Self {
            total_amount,
            down_payment,
            principal,
            amortization_years,
            annual_interest_rate,
            payment_frequency,
            compounding_frequency,
            first_payment_date,
            currency,
            quarter_step: QuarterStep::default(),
        }
    }

    pub fn with_quarter_step(mut self, quarter_step: QuarterStep) -> Self {
        self.quarter_step = quarter_step;
        self
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn down_payment(&self) -> Money {
        self.down_payment
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn amortization_years(&self) -> u32 {
        self.amortization_years
    }

    pub fn annual_interest_rate(&self) -> Rate {
        self.annual_interest_rate
    }

    pub fn payment_frequency(&self) -> Frequency {
        self.payment_frequency
    }

    pub fn compounding_frequency(&self) -> Frequency {
        self.compounding_frequency
    }

    pub fn first_payment_date(&self) -> NaiveDate {
        self.first_payment_date
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn quarter_step(&self) -> QuarterStep {
        self.quarter_step
    }
}

impl TryFrom<LoanInput> for LoanTerms {
    type Error = MortgageError;

    fn try_from(input: LoanInput) -> Result<Self, Self::Error> {
        let first_payment_date = parse_payment_date(&input.first_payment_date)?;

        Ok(LoanTerms::new(
            input.total_amount,
            input.down_payment,
            input.amortization_years,
            input.annual_interest_rate,
            input.payment_frequency,
            input.compounding_frequency,
            first_payment_date,
            input.currency,
        )
        .with_quarter_step(input.quarter_step))
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_payment_date(value: &str) -> MortgageResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| MortgageError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
