//! Line-based interactive prompts.
//!
//! [`Console`] owns the input and output streams so that every dialogue in
//! the tool can be driven from scripted input in tests, and from locked
//! stdin/stdout in the binary.

use crate::error::{BikeshareError, Result};
use crate::filters::{Choice, City, FilterSelection, Month};
use chrono::Weekday;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one answer, trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Aborted`] once input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("Input closed while waiting for: {prompt}");
            return Err(BikeshareError::Aborted);
        }
        Ok(line.trim().to_lowercase())
    }

    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

const CITY_PROMPT: &str = "Select one of the following cities: Chicago, New York City, Washington";
const MONTH_PROMPT: &str =
    "Select one of the following months: January, February, March, April, May, or June--or all";
const DAY_PROMPT: &str =
    "Select one of the following days: Monday, Tuesday, Wednesday, etc.--or all";

/// Asks until the answer parses, printing `invalid` after every rejection.
fn ask_until_valid<T, R, W>(console: &mut Console<R, W>, prompt: &str, invalid: &str) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        let answer = console.ask(prompt)?;
        match answer.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                tracing::debug!("Rejected answer '{answer}'");
                console.say(invalid)?;
            }
        }
    }
}

/// Asks for city, month and day in that order, re-prompting each until it
/// is valid, then prints the confirmation banner.
///
/// # Errors
///
/// Fails only if the terminal cannot be read or written, or input closes.
pub fn get_filters<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<FilterSelection> {
    console.say("Hello! Let's explore some US bikeshare data!")?;

    let city: City = ask_until_valid(console, CITY_PROMPT, "Invalid city entered.")?;
    let month: Choice<Month> = ask_until_valid(console, MONTH_PROMPT, "Invalid month entered.")?;
    let day: Choice<Weekday> = ask_until_valid(console, DAY_PROMPT, "Invalid day entered.")?;

    let selection = FilterSelection::new(city, month, day);
    console.say(selection)?;
    tracing::info!(
        city = city.key(),
        month = %month,
        day = %day,
        "Filters selected"
    );
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(script: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(script.as_bytes(), Vec::new())
    }

    fn printed(console: Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).expect("utf8 output")
    }

    #[test]
    fn test_ask_normalizes_answer() {
        let mut c = console("  YES \n");
        assert_eq!(c.ask("Continue?").expect("answer"), "yes");
        assert_eq!(printed(c), "Continue?\n");
    }

    #[test]
    fn test_ask_reports_closed_input() {
        let mut c = console("");
        assert!(matches!(c.ask("Anyone?"), Err(BikeshareError::Aborted)));
    }

    #[test]
    fn test_get_filters_normalizes_case() {
        let mut c = console("New York City\nMARCH\nfriday\n");
        let selection = get_filters(&mut c).expect("valid filters");
        assert_eq!(selection.city, City::NewYorkCity);
        assert_eq!(selection.month, Choice::Only(Month::March));
        assert_eq!(selection.day, Choice::Only(Weekday::Fri));

        let out = printed(c);
        assert!(out.contains("City: New York City"));
        assert!(out.contains("Month(s): March"));
        assert!(out.contains("Day(s): Friday"));
    }

    #[test]
    fn test_get_filters_reprompts_on_invalid_values() {
        let mut c = console("boston\nchicago\njuly\nall\nsomeday\nfri\nsunday\n");
        let selection = get_filters(&mut c).expect("valid filters");
        assert_eq!(selection.city, City::Chicago);
        assert_eq!(selection.month, Choice::All);
        assert_eq!(selection.day, Choice::Only(Weekday::Sun));

        let out = printed(c);
        assert_eq!(out.matches("Invalid city entered.").count(), 1);
        assert_eq!(out.matches("Invalid month entered.").count(), 1);
        assert_eq!(out.matches("Invalid day entered.").count(), 2);
        assert_eq!(out.matches(CITY_PROMPT).count(), 2);
        assert_eq!(out.matches(DAY_PROMPT).count(), 3);
    }

    #[test]
    fn test_get_filters_never_returns_invalid_city() {
        let mut c = console("boston\nparis\n");
        assert!(matches!(get_filters(&mut c), Err(BikeshareError::Aborted)));
    }
}
