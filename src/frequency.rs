use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, MortgageResult};

/// How often something happens in a year. Used both for payments and for
/// interest compounding; the two are independent axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Annual,
    SemiAnnual,
    Quarter,
    BiMonth,
    Month,
    BiWeek,
    Week,
}

/// The calendar distance between two consecutive payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarStep {
    Years(u32),
    Months(u32),
    Weeks(u64),
}

/// Length of one quarterly payment step.
///
/// `FourMonths` reproduces the long-standing schedule output, where a quarterly
/// loan advances four calendar months per payment. `ThreeMonths` follows the
/// calendar meaning of a quarter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuarterStep {
    #[default]
    FourMonths,
    ThreeMonths,
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Frequency::Annual,
        Frequency::SemiAnnual,
        Frequency::Quarter,
        Frequency::BiMonth,
        Frequency::Month,
        Frequency::BiWeek,
        Frequency::Week,
    ];

    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarter => 4,
            Frequency::BiMonth => 6,
            Frequency::Month => 12,
            Frequency::BiWeek => 26,
            Frequency::Week => 52,
        }
    }

    pub fn calendar_step(&self, quarter_step: QuarterStep) -> CalendarStep {
        match self {
            Frequency::Annual => CalendarStep::Years(1),
            Frequency::SemiAnnual => CalendarStep::Months(6),
            Frequency::Quarter => match quarter_step {
                QuarterStep::FourMonths => CalendarStep::Months(4),
                QuarterStep::ThreeMonths => CalendarStep::Months(3),
            },
            Frequency::BiMonth => CalendarStep::Months(2),
            Frequency::Month => CalendarStep::Months(1),
            Frequency::BiWeek => CalendarStep::Weeks(2),
            Frequency::Week => CalendarStep::Weeks(1),
        }
    }

    /// Advances `date` by one payment step.
    ///
    /// Month based steps clamp to the last day of the target month, so
    /// 2008-01-31 + 1 month is 2008-02-29.
    pub fn next_date(&self, date: NaiveDate, quarter_step: QuarterStep) -> MortgageResult<NaiveDate> {
        let next = match self.calendar_step(quarter_step) {
            CalendarStep::Years(years) => date.checked_add_months(Months::new(years * 12)),
            CalendarStep::Months(months) => date.checked_add_months(Months::new(months)),
            CalendarStep::Weeks(weeks) => date.checked_add_days(Days::new(weeks * 7)),
        };

        next.ok_or_else(|| MortgageError::NumericFault {
            context: format!("advancing payment date {date} by one {self} step"),
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarter => "Quarterly",
            Frequency::BiMonth => "Bi-Monthly",
            Frequency::Month => "Monthly",
            Frequency::BiWeek => "Bi-Weekly",
            Frequency::Week => "Weekly",
        };
        write!(f, "{s}")
    }
}

impl TryFrom<u32> for Frequency {
    type Error = MortgageError;

    fn try_from(periods_per_year: u32) -> Result<Self, Self::Error> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.periods_per_year() == periods_per_year)
            .ok_or_else(|| MortgageError::UnsupportedFrequency(periods_per_year.to_string()))
    }
}

impl TryFrom<Decimal> for Frequency {
    type Error = MortgageError;

    fn try_from(periods_per_year: Decimal) -> Result<Self, Self::Error> {
        if !periods_per_year.fract().is_zero() {
            return Err(MortgageError::UnsupportedFrequency(periods_per_year.to_string()));
        }

        periods_per_year
            .to_u32()
            .ok_or_else(|| MortgageError::UnsupportedFrequency(periods_per_year.to_string()))
            .and_then(Frequency::try_from)
    }
}

impl FromStr for Frequency {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");

        match normalized.as_str() {
            "annual" | "annually" | "yearly" => Ok(Frequency::Annual),
            "semi-annual" | "semi-annually" | "semiannual" => Ok(Frequency::SemiAnnual),
            "quarter" | "quarterly" => Ok(Frequency::Quarter),
            "bi-month" | "bi-monthly" | "bimonthly" => Ok(Frequency::BiMonth),
            "month" | "monthly" => Ok(Frequency::Month),
            "bi-week" | "bi-weekly" | "biweekly" => Ok(Frequency::BiWeek),
            "week" | "weekly" => Ok(Frequency::Week),
            other => match other.parse::<u32>() {
                Ok(periods_per_year) => Frequency::try_from(periods_per_year),
                Err(_) => Err(MortgageError::UnsupportedFrequency(s.to_string())),
            },
        }
    }
}

/// Maps any raw frequency representation onto the closed enum.
pub(crate) fn resolve<F>(frequency: F) -> MortgageResult<Frequency>
where
    F: TryInto<Frequency>,
    MortgageError: From<F::Error>,
{
    Ok(frequency.try_into()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn jan_first_2008() -> NaiveDate {
        NaiveDate::from_ymd_opt(2008, 1, 1).unwrap()
    }

    #[rstest]
    #[case(Frequency::Annual, 2009, 1, 1)]
    #[case(Frequency::SemiAnnual, 2008, 7, 1)]
    #[case(Frequency::Quarter, 2008, 5, 1)]
    #[case(Frequency::BiMonth, 2008, 3, 1)]
    #[case(Frequency::Month, 2008, 2, 1)]
    #[case(Frequency::BiWeek, 2008, 1, 15)]
    #[case(Frequency::Week, 2008, 1, 8)]
    fn test_next_date_by_frequency(
        #[case] frequency: Frequency,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let next = frequency.next_date(jan_first_2008(), QuarterStep::default()).unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[test]
    fn test_quarter_calendar_step_is_three_months() {
        let next = Frequency::Quarter
            .next_date(jan_first_2008(), QuarterStep::ThreeMonths)
            .unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(2008, 4, 1).unwrap());
    }

    #[test]
    fn test_month_step_clamps_to_end_of_month() {
        let jan_31 = NaiveDate::from_ymd_opt(2008, 1, 31).unwrap();
        let feb = Frequency::Month.next_date(jan_31, QuarterStep::default()).unwrap();
        assert_eq!(feb, NaiveDate::from_ymd_opt(2008, 2, 29).unwrap());

        let leap_day = NaiveDate::from_ymd_opt(2008, 2, 29).unwrap();
        let next_year = Frequency::Annual.next_date(leap_day, QuarterStep::default()).unwrap();
        assert_eq!(next_year, NaiveDate::from_ymd_opt(2009, 2, 28).unwrap());
    }

    #[test]
    fn test_periods_per_year_round_trip_through_raw_value() {
        for frequency in Frequency::ALL {
            assert_eq!(Frequency::try_from(frequency.periods_per_year()).unwrap(), frequency);
        }
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(365)]
    #[case(666)]
    fn test_unknown_periods_per_year_is_rejected(#[case] raw: u32) {
        let err = Frequency::try_from(raw).unwrap_err();
        assert_eq!(err, MortgageError::UnsupportedFrequency(raw.to_string()));
        assert!(err.to_string().contains("Unsupported payment frequency"));
    }

    #[test]
    fn test_decimal_frequency_must_be_integral() {
        assert_eq!(Frequency::try_from(dec!(12)).unwrap(), Frequency::Month);
        assert!(Frequency::try_from(dec!(12.5)).is_err());
        assert!(Frequency::try_from(dec!(-12)).is_err());
    }

    #[rstest]
    #[case("monthly", Frequency::Month)]
    #[case("Semi-Annual", Frequency::SemiAnnual)]
    #[case("semi_annual", Frequency::SemiAnnual)]
    #[case("QUARTERLY", Frequency::Quarter)]
    #[case("bi weekly", Frequency::BiWeek)]
    #[case("52", Frequency::Week)]
    fn test_parse_frequency(#[case] raw: &str, #[case] expected: Frequency) {
        assert_eq!(raw.parse::<Frequency>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_frequency() {
        assert!(matches!(
            "fortnightly-ish".parse::<Frequency>(),
            Err(MortgageError::UnsupportedFrequency(_))
        ));
        assert!("7".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Frequency::SemiAnnual).unwrap();
        assert_eq!(json, "\"semi-annual\"");
        let parsed: Frequency = serde_json::from_str("\"bi-week\"").unwrap();
        assert_eq!(parsed, Frequency::BiWeek);
    }
}
