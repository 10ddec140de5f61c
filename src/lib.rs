//! `mortgage_calc` is a Rust library for calculating amortized mortgage payment schedules.
//!
//! Given a purchase price, a down payment, a nominal annual rate with its compounding
//! convention and a payment frequency, it derives:
//! - **Periodic rate**: the effective interest rate applied per payment period.
//! - **Level payment**: the fixed amount paid every period (annuity formula).
//! - **Schedule**: a period-by-period breakdown of interest, principal, balance,
//!   running totals and payment dates.
//! - **Normalized payments**: the payment expressed per month and per year.
//!
//! All money math runs on `rust_decimal`. The only floating-point step is the
//! fractional power used when converting the nominal rate, see [`rate::lossy_pow`].
//!
//! ## Usage
//!
//! Add `mortgage_calc` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mortgage_calc = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then, use the `calculate_mortgage` function to get the full summary:
//!
//! ```rust
//! use mortgage_calc::{calculate_mortgage, Currency, Frequency, LoanInput, QuarterStep};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let input = LoanInput {
//!         total_amount: dec!(250_000),
//!         down_payment: dec!(50_000),
//!         amortization_years: 25,
//!         annual_interest_rate: dec!(0.04),
//!         payment_frequency: Frequency::Month,
//!         compounding_frequency: Frequency::SemiAnnual,
//!         first_payment_date: "2008-01-01".to_string(),
//!         currency: Currency::USD,
//!         quarter_step: QuarterStep::default(),
//!     };
//!
//!     match calculate_mortgage(input) {
//!         Ok(summary) => {
//!             println!("Payment:      {:.2}", summary.payment_per_period);
//!             println!("Annual:       {:.2}", summary.annual_payment);
//!             println!("Total Paid:   {:.2}", summary.total_paid);
//!             println!("Payments:     {}", summary.schedule.len());
//!         }
//!         Err(e) => {
//!             eprintln!("Error calculating mortgage: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod calculator;
pub mod error;
pub mod frequency;
pub mod loan;
pub mod payment;
pub mod rate;
pub mod schedule;
pub mod types;

pub use calculator::{MortgageCalculator, MortgageSummary};
pub use error::{MortgageError, MortgageResult};
pub use frequency::{CalendarStep, Frequency, QuarterStep};
pub use loan::{LoanInput, LoanTerms, parse_payment_date};
pub use payment::{mortgage_payment, to_annual, to_monthly, total_number_of_payments};
pub use rate::interest_rate_per_payment_frequency;
pub use schedule::{PeriodRecord, ScheduleParams, generate_schedule};
pub use types::{Currency, Money, Rate};

/// Builds the loan terms from `input` and computes every output.
///
/// This is the main entry point of the library.
///
/// # Errors
///
/// Returns [`MortgageError::InvalidDate`] if the first payment date is not a
/// `YYYY-MM-DD` date, and [`MortgageError::NumericFault`] if the rate or term
/// pushes the arithmetic out of range.
pub fn calculate_mortgage(input: LoanInput) -> MortgageResult<MortgageSummary> {
    let terms = LoanTerms::try_from(input)?;
    MortgageCalculator::new(terms).summary()
}
