use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use rust_decimal::Decimal;
use tabled::{Table, builder::Builder};
use tracing::{Level, debug};

use mortgage_calc::{
    Currency, Frequency, LoanInput, LoanTerms, MortgageCalculator, MortgageSummary, QuarterStep,
};

/// Amortized mortgage payment schedules
#[derive(Parser, Debug)]
#[command(
    name = "mortgage-calc",
    version,
    about = "Amortized mortgage payment schedules",
    long_about = "Computes the level payment and the full amortization schedule of a \
                  fixed-rate mortgage from its price, down payment, rate, compounding \
                  convention and payment frequency."
)]
struct Cli {
    /// Purchase price of the property
    #[arg(long, default_value = "250000", value_parser = parse_amount)]
    total: Decimal,

    /// Amount paid up front
    #[arg(long, default_value = "50000", value_parser = parse_amount)]
    down_payment: Decimal,

    /// Amortization term in whole years
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..))]
    years: u32,

    /// Nominal annual interest rate as a decimal fraction (0.04 = 4%)
    #[arg(long, default_value = "0.04", value_parser = parse_amount)]
    rate: Decimal,

    /// Payment frequency (annual, semi-annual, quarterly, bi-monthly, monthly, bi-weekly, weekly)
    #[arg(long, default_value = "monthly")]
    frequency: Frequency,

    /// Compounding frequency, same values as --frequency
    #[arg(long, default_value = "semi-annual")]
    compounding: Frequency,

    /// First payment date, YYYY-MM-DD
    #[arg(long, default_value = "2008-01-01")]
    date: String,

    /// Currency code attached to amounts
    #[arg(long, default_value = "USD")]
    currency: Currency,

    /// Advance quarterly payments by three months instead of four
    #[arg(long, action = ArgAction::SetTrue)]
    calendar_quarters: bool,

    /// Read the loan from a JSON file instead of the flags above
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table")]
    output: OutputFormat,

    /// Log calculation details to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Summary,
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let value: Decimal = raw.trim().parse().map_err(|e| format!("{raw:?} is not a number: {e}"))?;
    if value.is_sign_negative() {
        return Err(format!("{raw:?} must not be negative"));
    }
    Ok(value)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn loan_input(cli: &Cli) -> anyhow::Result<LoanInput> {
    if let Some(path) = &cli.input {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading loan input from {}", path.display()))?;
        let input: LoanInput = serde_json::from_str(&raw)
            .with_context(|| format!("parsing loan input from {}", path.display()))?;
        return Ok(input);
    }

    let quarter_step = if cli.calendar_quarters {
        QuarterStep::ThreeMonths
    } else {
        QuarterStep::FourMonths
    };

    Ok(LoanInput {
        total_amount: cli.total,
        down_payment: cli.down_payment,
        amortization_years: cli.years,
        annual_interest_rate: cli.rate,
        payment_frequency: cli.frequency,
        compounding_frequency: cli.compounding,
        first_payment_date: cli.date.clone(),
        currency: cli.currency.clone(),
        quarter_step,
    })
}

fn print_summary(summary: &MortgageSummary) {
    let currency = &summary.currency;
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["Total amount".to_string(), format!("{:.2} {currency}", summary.total_amount)]);
    builder.push_record(["Down payment".to_string(), format!("{:.2} {currency}", summary.down_payment)]);
    builder.push_record(["Principal".to_string(), format!("{:.2} {currency}", summary.principal)]);
    builder.push_record(["Financed".to_string(), format!("{:.2}%", summary.percent_of_loan_financed)]);
    builder.push_record(["Payment frequency".to_string(), summary.payment_frequency.to_string()]);
    builder.push_record(["Compounding".to_string(), summary.compounding_frequency.to_string()]);
    builder.push_record(["Rate per payment".to_string(), format!("{:.6}", summary.interest_rate_per_payment)]);
    builder.push_record(["Number of payments".to_string(), summary.total_number_of_payments.to_string()]);
    builder.push_record(["Payment".to_string(), format!("{:.2} {currency}", summary.payment_per_period)]);
    builder.push_record(["Monthly equivalent".to_string(), format!("{:.2} {currency}", summary.monthly_payment)]);
    builder.push_record(["Annual equivalent".to_string(), format!("{:.2} {currency}", summary.annual_payment)]);
    builder.push_record(["Total interest".to_string(), format!("{:.2} {currency}", summary.total_interest)]);
    builder.push_record(["Total paid".to_string(), format!("{:.2} {currency}", summary.total_paid)]);
    println!("{}", Table::from(builder));
}

fn print_schedule(summary: &MortgageSummary) {
    if summary.schedule.is_empty() {
        println!("(empty schedule)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Year", "#", "Date", "Payment", "Interest", "Principal", "Balance", "Total Interest", "Total Paid",
    ]);
    for record in &summary.schedule {
        builder.push_record([
            record.year.to_string(),
            record.period.to_string(),
            record.payment_date.to_string(),
            format!("{:.2}", record.payment),
            format!("{:.2}", record.interest),
            format!("{:.2}", record.principal),
            format!("{:.2}", record.balance),
            format!("{:.2}", record.cumulative_interest),
            format!("{:.2}", record.cumulative_paid),
        ]);
    }
    println!("{}", Table::from(builder));
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let input = loan_input(&cli)?;
    debug!(?input, "loan input");

    let terms = LoanTerms::try_from(input).context("building loan terms")?;
    let summary = MortgageCalculator::new(terms)
        .summary()
        .context("calculating mortgage")?;

    match cli.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
            println!("{json}");
        }
        OutputFormat::Summary => print_summary(&summary),
        OutputFormat::Table => {
            print_summary(&summary);
            println!();
            print_schedule(&summary);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_match_canonical_loan() {
        let cli = Cli::parse_from(["mortgage-calc"]);
        let input = loan_input(&cli).unwrap();

        assert_eq!(input.total_amount, dec!(250000));
        assert_eq!(input.down_payment, dec!(50000));
        assert_eq!(input.amortization_years, 25);
        assert_eq!(input.annual_interest_rate, dec!(0.04));
        assert_eq!(input.payment_frequency, Frequency::Month);
        assert_eq!(input.compounding_frequency, Frequency::SemiAnnual);
        assert_eq!(input.first_payment_date, "2008-01-01");
        assert_eq!(input.quarter_step, QuarterStep::FourMonths);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "mortgage-calc",
            "--frequency",
            "quarterly",
            "--compounding",
            "12",
            "--calendar-quarters",
            "--currency",
            "cad",
        ]);
        let input = loan_input(&cli).unwrap();

        assert_eq!(input.payment_frequency, Frequency::Quarter);
        assert_eq!(input.compounding_frequency, Frequency::Month);
        assert_eq!(input.quarter_step, QuarterStep::ThreeMonths);
        assert_eq!(input.currency, Currency::CAD);
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        assert!(Cli::try_parse_from(["mortgage-calc", "--frequency", "daily"]).is_err());
        assert!(Cli::try_parse_from(["mortgage-calc", "--years", "0"]).is_err());
        assert!(Cli::try_parse_from(["mortgage-calc", "--total", "-5"]).is_err());
    }

    #[test]
    fn test_bad_date_fails_in_run() {
        let cli = Cli::parse_from(["mortgage-calc", "--date", "2008-1-x", "--output", "json"]);
        let err = run(cli).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid first payment date"));
    }
}
