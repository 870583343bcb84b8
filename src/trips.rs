//! The in-memory trip table for one city.

use crate::error::Result;
use crate::filters::City;
use polars::prelude::*;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

// Derived at load time from Start Time.
pub const MONTH: &str = "month";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const HOUR: &str = "hour";

/// Placeholder shown for missing Gender / Birth Year cells.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone)]
pub struct TripTable {
    city: City,
    frame: DataFrame,
}

impl TripTable {
    pub fn new(city: City, frame: DataFrame) -> Self {
        Self { city, frame }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    pub fn has_gender(&self) -> bool {
        self.has_column(GENDER)
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_column(BIRTH_YEAR)
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        Ok(self.frame.column(name)?)
    }

    /// Copy of the table for display, with null Gender and Birth Year
    /// cells replaced by [`NOT_AVAILABLE`]. Birth years render as whole
    /// numbers. Columns absent from the schema are left alone.
    pub fn display_frame(&self) -> Result<DataFrame> {
        let mut fills = Vec::new();
        if self.has_gender() {
            fills.push(
                col(GENDER)
                    .cast(DataType::String)
                    .fill_null(lit(NOT_AVAILABLE)),
            );
        }
        if self.has_birth_year() {
            fills.push(
                col(BIRTH_YEAR)
                    .cast(DataType::Int64)
                    .cast(DataType::String)
                    .fill_null(lit(NOT_AVAILABLE)),
            );
        }
        if fills.is_empty() {
            return Ok(self.frame.clone());
        }
        Ok(self.frame.clone().lazy().with_columns(fills).collect()?)
    }
}
