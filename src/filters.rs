//! City, month and day selections.
//!
//! All parsing is case-insensitive and normalizes to the canonical lowercase
//! key; display uses title case. Month and weekday names each live in exactly
//! one static table so the name/number mapping cannot drift.

use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

/// Separator printed around banners and after every report.
pub const SEPARATOR: &str = "----------------------------------------";

/// One of the three cities with a bundled dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    /// Canonical lowercase name, as typed at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Chicago => "Chicago",
            Self::NewYorkCity => "New York City",
            Self::Washington => "Washington",
        }
    }

    /// Dataset file backing this city, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.key() == wanted)
            .ok_or_else(|| format!("unknown city: {s}"))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Months covered by the datasets (January through June).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

const MONTHS: [(Month, &str); 6] = [
    (Month::January, "January"),
    (Month::February, "February"),
    (Month::March, "March"),
    (Month::April, "April"),
    (Month::May, "May"),
    (Month::June, "June"),
];

impl Month {
    /// 1-based month number, as derived from a timestamp.
    pub fn number(self) -> u32 {
        MONTHS
            .iter()
            .position(|(month, _)| *month == self)
            .map_or(0, |idx| idx as u32 + 1)
    }

    pub fn from_number(number: u32) -> Option<Self> {
        let idx = usize::try_from(number.checked_sub(1)?).ok()?;
        MONTHS.get(idx).map(|(month, _)| *month)
    }

    pub fn name(self) -> &'static str {
        MONTHS
            .iter()
            .find(|(month, _)| *month == self)
            .map_or("", |(_, name)| name)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MONTHS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(wanted))
            .map(|(month, _)| *month)
            .ok_or_else(|| format!("unknown month: {s}"))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

/// Full English name of a weekday ("Monday"), as stored in `day_of_week`.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS
        .iter()
        .find(|(weekday, _)| *weekday == day)
        .map_or("", |(_, name)| name)
}

/// Parses a full weekday name in any letter case. Abbreviations are rejected.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let wanted = s.trim();
    WEEKDAYS
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(wanted))
        .map(|(weekday, _)| *weekday)
}

/// Either every value or one specific value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T: Copy> Choice<T> {
    pub fn only(&self) -> Option<T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(*value),
        }
    }
}

impl FromStr for Choice<Month> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl FromStr for Choice<Weekday> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        parse_weekday(s)
            .map(Self::Only)
            .ok_or_else(|| format!("unknown day: {s}"))
    }
}

impl fmt::Display for Choice<Month> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(month) => f.write_str(month.name()),
        }
    }
}

impl fmt::Display for Choice<Weekday> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

/// A validated city/month/day triple. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: Choice<Month>,
    pub day: Choice<Weekday>,
}

impl FilterSelection {
    pub fn new(city: City, month: Choice<Month>, day: Choice<Weekday>) -> Self {
        Self { city, month, day }
    }

    /// Whole dataset for a city, no narrowing.
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, Choice::All, Choice::All)
    }
}

/// Confirmation banner echoing the selection.
impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f)?;
        writeln!(f, "Retrieving data for the following:")?;
        writeln!(f, "City: {}", self.city)?;
        writeln!(f, "Month(s): {}", self.month)?;
        writeln!(f, "Day(s): {}", self.day)?;
        writeln!(f)?;
        write!(f, "{SEPARATOR}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_parse_any_case() {
        assert_eq!("CHICAGO".parse::<City>(), Ok(City::Chicago));
        assert_eq!("New York City".parse::<City>(), Ok(City::NewYorkCity));
        assert_eq!("  washington ".parse::<City>(), Ok(City::Washington));
        assert!("boston".parse::<City>().is_err());
        assert!("newyorkcity".parse::<City>().is_err());
    }

    #[test]
    fn test_city_keys_and_files() {
        let keys: Vec<&str> = City::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, ["chicago", "new york city", "washington"]);
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
    }

    #[test]
    fn test_month_table_round_trip() {
        for number in 1..=6 {
            let month = Month::from_number(number).expect("month in range");
            assert_eq!(month.number(), number);
        }
        assert_eq!(Month::March.number(), 3);
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(7), None);
        assert_eq!(Month::from_number(6), Some(Month::June));
    }

    #[test]
    fn test_month_choice_parse() {
        assert_eq!("ALL".parse::<Choice<Month>>(), Ok(Choice::All));
        assert_eq!(
            "march".parse::<Choice<Month>>(),
            Ok(Choice::Only(Month::March))
        );
        assert!("july".parse::<Choice<Month>>().is_err());
        assert!("mar".parse::<Choice<Month>>().is_err());
    }

    #[test]
    fn test_day_choice_parse() {
        assert_eq!(
            "Friday".parse::<Choice<Weekday>>(),
            Ok(Choice::Only(Weekday::Fri))
        );
        assert_eq!("all".parse::<Choice<Weekday>>(), Ok(Choice::All));
        assert!("fri".parse::<Choice<Weekday>>().is_err());
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }

    #[test]
    fn test_banner_is_title_cased() {
        let selection =
            FilterSelection::new(City::NewYorkCity, Choice::Only(Month::May), Choice::All);
        let banner = selection.to_string();
        assert!(banner.contains("City: New York City"));
        assert!(banner.contains("Month(s): May"));
        assert!(banner.contains("Day(s): All"));
        assert!(banner.starts_with(SEPARATOR));
        assert_eq!(SEPARATOR.len(), 40);
    }
}
