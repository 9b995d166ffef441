//! City, month and weekday selection.
//!
//! The `FromStr` impls are the validation grammar: pure, case-insensitive and
//! independent of any terminal. [`get_filters`] wraps them in retry-until-valid
//! prompts.

use crate::console::Console;
use crate::error::{ExplorerError, Result};
use chrono::{Month, Weekday};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const SEPARATOR: &str = "----------------------------------------";

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

/// One of the three supported bikeshare systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    /// Lower-case name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }

    /// Dataset file name, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.name() == lowered)
            .ok_or_else(|| ExplorerError::InvalidCity(s.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// Calendar number (1 = January) of the selected month.
    pub fn number(self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Only(month) => Some(month.number_from_month()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        if lowered == "all" {
            return Ok(Self::All);
        }
        MONTHS
            .into_iter()
            .find(|month| matches_name(&lowered, month.name()))
            .map(Self::Only)
            .ok_or_else(|| ExplorerError::InvalidMonth(s.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Day index with Monday = 0.
    pub fn index(self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Only(day) => Some(day.num_days_from_monday()),
        }
    }
}

impl FromStr for DayFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        if lowered == "all" {
            return Ok(Self::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|(_, name)| matches_name(&lowered, name))
            .map(|(day, _)| Self::Only(day))
            .ok_or_else(|| ExplorerError::InvalidDay(s.to_owned()))
    }
}

/// Accepts the full English name or its three letter abbreviation.
fn matches_name(lowered: &str, full: &str) -> bool {
    let full = full.to_lowercase();
    lowered == full || full.get(..3).is_some_and(|abbr| abbr == lowered)
}

/// English name of a calendar month number (1 = January).
pub fn month_name(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(index).map(|month| month.name())
}

/// English name of a weekday index (Monday = 0).
pub fn day_name(index: u32) -> Option<&'static str> {
    WEEKDAYS
        .get(usize::try_from(index).ok()?)
        .map(|(_, name)| *name)
}

/// Filters chosen for one session iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TripFilters {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

/// Asks for a city, a month and a day, re-prompting until each is valid.
///
/// # Errors
///
/// Returns [`ExplorerError::Aborted`] if input closes before all three values
/// are collected, or an I/O error from the console.
pub fn get_filters<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<TripFilters> {
    writeln!(console.out(), "Hello! Let's explore some US bikeshare data!")?;

    let city = prompt_until_valid(
        console,
        "Please input a city name among chicago, new york city and washington.",
        "The city name isn't supported or can't be recognized. Please try again.",
    )?;
    let month = prompt_until_valid(
        console,
        "Please input a month name, or `all` for all months.",
        "The month name can't be recognized, please try again.",
    )?;
    let day = prompt_until_valid(
        console,
        "Please input a day name, or `all` for all weekdays.",
        "The day name can't be recognized, please try again.",
    )?;

    writeln!(console.out(), "{SEPARATOR}")?;
    Ok(TripFilters { city, month, day })
}

fn prompt_until_valid<T, R, W>(
    console: &mut Console<R, W>,
    prompt: &str,
    rejection: &str,
) -> Result<T>
where
    T: FromStr<Err = ExplorerError>,
    R: BufRead,
    W: Write,
{
    loop {
        let raw = console.ask(prompt)?.ok_or(ExplorerError::Aborted)?;
        match raw.parse::<T>() {
            Ok(parsed) => return Ok(parsed),
            Err(err) => {
                tracing::debug!(%err, "rejected input");
                writeln!(console.out(), "{rejection}")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_city_is_case_insensitive() {
        for raw in ["Chicago", "CHICAGO", "chicago"] {
            assert_eq!(raw.parse::<City>().unwrap(), City::Chicago, "{raw}");
        }
        assert_eq!(
            "New York City".parse::<City>().unwrap().file_name(),
            "new_york_city.csv"
        );
    }

    #[test]
    fn test_city_rejects_unknown_and_padded_names() {
        assert!(matches!(
            "atlantis".parse::<City>(),
            Err(ExplorerError::InvalidCity(_))
        ));
        assert!("chicago ".parse::<City>().is_err(), "no trimming");
        assert!("new york".parse::<City>().is_err(), "partial name");
    }

    #[test]
    fn test_month_full_and_abbreviated_agree() {
        for raw in ["January", "jan", "JAN", "jAnUaRy"] {
            assert_eq!(raw.parse::<MonthFilter>().unwrap().number(), Some(1), "{raw}");
        }
        assert_eq!("dec".parse::<MonthFilter>().unwrap().number(), Some(12));
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);
    }

    #[test]
    fn test_month_rejects_other_spellings() {
        for raw in ["sept", "ja", "janu", "", "13"] {
            assert!(
                matches!(raw.parse::<MonthFilter>(), Err(ExplorerError::InvalidMonth(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_day_full_and_abbreviated_agree() {
        assert_eq!("Monday".parse::<DayFilter>().unwrap().index(), Some(0));
        assert_eq!("mon".parse::<DayFilter>().unwrap().index(), Some(0));
        assert_eq!("SUN".parse::<DayFilter>().unwrap().index(), Some(6));
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert!(matches!(
            "weds".parse::<DayFilter>(),
            Err(ExplorerError::InvalidDay(_))
        ));
    }

    #[test]
    fn test_name_lookups() {
        assert_eq!(month_name(3), Some("March"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(day_name(0), Some("Monday"));
        assert_eq!(day_name(7), None);
    }

    #[test]
    fn test_get_filters_retries_invalid_city() {
        let input = Cursor::new("atlantis\nChicago\nMAR\nall\n");
        let mut console = Console::new(input, Vec::new());

        let filters = get_filters(&mut console).unwrap();
        assert_eq!(filters.city, City::Chicago);
        assert_eq!(filters.month, MonthFilter::Only(Month::March));
        assert_eq!(filters.day, DayFilter::All);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output.matches("Please input a city name").count(), 2);
        assert_eq!(output.matches("city name isn't supported").count(), 1);
        assert!(output.ends_with(&format!("{SEPARATOR}\n")), "{output}");
    }

    #[test]
    fn test_get_filters_aborts_on_closed_input() {
        let mut console = Console::new(Cursor::new("washington\nbogus\n"), Vec::new());
        assert!(matches!(
            get_filters(&mut console),
            Err(ExplorerError::Aborted)
        ));
    }
}
