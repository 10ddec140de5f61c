use chrono::NaiveDate;
use mortgage_calc::{
    Currency, Frequency, LoanTerms, MortgageCalculator, MortgageError, to_annual, to_monthly,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// $250,000 property, $50,000 down, 4% compounded semi-annually, 25 years monthly.
// Expected values cross-checked against a third-party Canadian mortgage calculator.
fn canonical() -> MortgageCalculator {
    let terms = LoanTerms::new(
        dec!(250000.00),
        dec!(50000.00),
        25,
        dec!(0.04),
        Frequency::Month,
        Frequency::SemiAnnual,
        NaiveDate::from_ymd_opt(2008, 1, 1).unwrap(),
        Currency::USD,
    );
    MortgageCalculator::new(terms)
}

#[test]
fn test_scalar_outputs() {
    let calc = canonical();

    assert_eq!(calc.payment_frequency(), Frequency::Month);
    assert_eq!(calc.percent_of_loan_financed(), dec!(80));
    assert_eq!(calc.interest_rate_per_payment_frequency().unwrap().round_dp(4), dec!(0.0033));
    assert_eq!(calc.total_number_of_payments().unwrap(), 300);
    assert_eq!(calc.payment_per_period().unwrap().round_dp(2), dec!(1052.04));
    assert_eq!(calc.monthly_payment().unwrap().round_dp(2), dec!(1052.04));
    assert_eq!(calc.annual_payment().unwrap().round_dp(2), dec!(12624.48));
}

#[test]
fn test_schedule_rows() {
    let schedule = canonical().payment_schedule().unwrap();
    assert_eq!(schedule.len(), 300);

    // Year 1, month 1
    let first = &schedule[0];
    assert_eq!((first.year, first.period), (1, 1));
    assert_eq!(first.interest.round_dp(2), dec!(661.18));
    assert_eq!(first.principal.round_dp(2), dec!(390.86));
    assert_eq!(first.balance.round_dp(2), dec!(199609.14));
    assert_eq!(first.payment_date, NaiveDate::from_ymd_opt(2008, 2, 1).unwrap());

    // Year 1, month 5
    let fifth = &schedule[4];
    assert_eq!((fifth.year, fifth.period), (1, 5));
    assert_eq!(fifth.interest.round_dp(2), dec!(655.98));
    assert_eq!(fifth.principal.round_dp(2), dec!(396.06));
    assert_eq!(fifth.balance.round_dp(2), dec!(198032.72));

    // Year 25, month 12. No balloon correction, so only approximately zero.
    let last = &schedule[299];
    assert_eq!((last.year, last.period), (25, 12));
    assert_eq!(last.interest.round_dp(2), dec!(3.47));
    assert_eq!(last.principal.round_dp(2), dec!(1048.57));
    assert_eq!(last.balance.round_dp(2).abs(), Decimal::ZERO);
    assert_eq!(last.payment_date, NaiveDate::from_ymd_opt(2033, 1, 1).unwrap());
}

#[test]
fn test_final_total_paid_is_payment_times_count() {
    let calc = canonical();
    let payment = calc.payment_per_period().unwrap();
    let schedule = calc.payment_schedule().unwrap();

    let last = schedule.last().unwrap();
    assert_eq!(last.cumulative_paid.round_dp(6), (payment * dec!(300)).round_dp(6));
    assert_eq!(
        (last.cumulative_paid - last.cumulative_interest).round_dp(2),
        dec!(200000.00)
    );
}

#[test]
fn test_normalizer_rejects_raw_unknown_frequency() {
    let payment = dec!(666.00);
    for raw in [0u32, 3, 666] {
        let err = to_monthly(payment, raw).unwrap_err();
        assert!(matches!(err, MortgageError::UnsupportedFrequency(_)));
        assert!(to_annual(payment, raw).is_err());
    }
}
