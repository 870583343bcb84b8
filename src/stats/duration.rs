use super::Report;
use crate::error::Result;
use crate::trips::{TRIP_DURATION, TripTable};
use polars::prelude::*;
use std::fmt;

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    pub mean: Option<f64>,
}

impl Report for DurationStats {
    const HEADING: &'static str = "Calculating Trip Duration...";

    fn compute(table: &TripTable) -> Result<Self> {
        let seconds = table
            .column(TRIP_DURATION)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let seconds = seconds.f64()?;

        Ok(Self {
            total: seconds.sum().unwrap_or(0.0),
            mean: seconds.mean(),
        })
    }
}

/// Whole numbers print without a fractional part, like the source column.
fn fmt_seconds(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Travel Time: {} seconds", fmt_seconds(self.total))?;
        match self.mean {
            Some(mean) => write!(f, "\nMean Travel Time: {mean:.1} seconds"),
            None => write!(f, "\nMean Travel Time: no trips"),
        }
    }
}
