use super::{Report, mode_f64, ranked_counts};
use crate::error::{BikeshareError, Result};
use crate::trips::{BIRTH_YEAR, GENDER, TripTable, USER_TYPE};
use polars::prelude::*;
use std::fmt;

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

/// Bikeshare user demographics.
///
/// `genders` and `birth_years` are `None` when the table has no such data,
/// either because the column is absent (Washington) or because every
/// filtered row leaves it blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYears>,
}

fn birth_years(column: &Column) -> Result<Option<BirthYears>> {
    let years = column.as_materialized_series().cast(&DataType::Float64)?;
    let ca = years.f64()?;
    let (Some(earliest), Some(most_recent), Some(most_common)) =
        (ca.min(), ca.max(), mode_f64(column)?)
    else {
        return Ok(None);
    };
    Ok(Some(BirthYears {
        earliest: earliest as i64,
        most_recent: most_recent as i64,
        most_common: most_common as i64,
    }))
}

impl Report for UserStats {
    const HEADING: &'static str = "Calculating User Stats...";

    fn compute(table: &TripTable) -> Result<Self> {
        let user_types = ranked_counts(table.column(USER_TYPE)?)?;
        if user_types.len() < 2 {
            return Err(BikeshareError::InsufficientCategories {
                column: USER_TYPE.to_owned(),
                expected: 2,
                found: user_types.len(),
            });
        }

        let genders = if table.has_gender() {
            Some(ranked_counts(table.column(GENDER)?)?).filter(|g| !g.is_empty())
        } else {
            None
        };

        let birth_years = if table.has_birth_year() {
            birth_years(table.column(BIRTH_YEAR)?)?
        } else {
            None
        };

        Ok(Self {
            user_types,
            genders,
            birth_years,
        })
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (user_type, count) in &self.user_types {
            writeln!(f, "{user_type}: {count}")?;
        }

        match &self.genders {
            Some(genders) => {
                writeln!(f)?;
                for (gender, count) in genders {
                    writeln!(f, "{gender}: {count}")?;
                }
            }
            None => writeln!(f, "\nNo user gender data available.")?,
        }

        match self.birth_years {
            Some(years) => {
                writeln!(f, "\nEarliest Birth Year: {}", years.earliest)?;
                writeln!(f, "Most Recent Birth Year: {}", years.most_recent)?;
                write!(f, "Most Common Birth Year: {}", years.most_common)
            }
            None => write!(f, "\nNo user birth data available."),
        }
    }
}
