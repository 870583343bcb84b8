use super::{Report, mode_str, mode_u32};
use crate::error::{BikeshareError, Result};
use crate::filters::Month;
use crate::trips::{DAY_OF_WEEK, HOUR, MONTH, TripTable};
use std::fmt;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Month,
    pub day_of_week: String,
    pub start_hour: u32,
}

fn empty(column: &str) -> BikeshareError {
    BikeshareError::DataProcessing(format!("no values in '{column}' to take a mode of"))
}

impl Report for TimeStats {
    const HEADING: &'static str = "Calculating The Most Frequent Times of Travel...";

    fn compute(table: &TripTable) -> Result<Self> {
        let month_number = mode_u32(table.column(MONTH)?)?.ok_or_else(|| empty(MONTH))?;
        let month = Month::from_number(month_number).ok_or_else(|| {
            BikeshareError::DataProcessing(format!("month {month_number} is outside January-June"))
        })?;
        let day_of_week =
            mode_str(table.column(DAY_OF_WEEK)?)?.ok_or_else(|| empty(DAY_OF_WEEK))?;
        let start_hour = mode_u32(table.column(HOUR)?)?.ok_or_else(|| empty(HOUR))?;

        Ok(Self {
            month,
            day_of_week,
            start_hour,
        })
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most Common Month: {}", self.month)?;
        writeln!(f, "\nMost Common Day Of The Week: {}", self.day_of_week)?;
        write!(f, "\nMost Common Start Hour: {}", self.start_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::City;
    use polars::prelude::*;

    #[test]
    fn test_time_stats() -> anyhow::Result<()> {
        let df = df!(
            MONTH => &[3u32, 3, 1, 6],
            DAY_OF_WEEK => &["Friday", "Monday", "Friday", "Sunday"],
            HOUR => &[8u32, 17, 17, 8]
        )?;
        let stats = TimeStats::compute(&TripTable::new(City::Chicago, df))?;
        assert_eq!(stats.month, Month::March);
        assert_eq!(stats.day_of_week, "Friday");
        // 8 and 17 tie; the smaller hour wins
        assert_eq!(stats.start_hour, 8);

        let text = stats.to_string();
        assert!(text.contains("Most Common Month: March"));
        assert!(text.contains("Most Common Start Hour: 8"));
        Ok(())
    }
}
