use super::{Report, mode_str};
use crate::error::{BikeshareError, Result};
use crate::trips::{END_STATION, START_STATION, TripTable};
use polars::prelude::*;
use std::fmt;

const TRIPS: &str = "trips";

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    /// Most frequent (start, end) combination.
    pub trip: (String, String),
    pub trip_count: usize,
}

/// Groups by (start, end) and returns the most frequent pair.
///
/// Ties go to the smallest pair in (start, end) order.
fn most_common_trip(table: &TripTable) -> Result<Option<((String, String), usize)>> {
    let groups = table
        .frame()
        .clone()
        .lazy()
        .select([col(START_STATION), col(END_STATION)])
        .group_by([col(START_STATION), col(END_STATION)])
        .agg([len().alias(TRIPS)])
        .collect()?;

    let starts = groups.column(START_STATION)?.as_materialized_series().cast(&DataType::String)?;
    let ends = groups.column(END_STATION)?.as_materialized_series().cast(&DataType::String)?;
    let counts = groups.column(TRIPS)?.as_materialized_series().cast(&DataType::UInt64)?;

    let mut best: Option<((String, String), usize)> = None;
    for ((start, end), count) in starts
        .str()?
        .into_iter()
        .zip(ends.str()?.into_iter())
        .zip(counts.u64()?.into_iter())
    {
        let (Some(start), Some(end), Some(count)) = (start, end, count) else {
            continue;
        };
        let count = count as usize;
        let better = match &best {
            None => true,
            Some(((best_start, best_end), best_count)) => {
                count > *best_count
                    || (count == *best_count
                        && (start, end) < (best_start.as_str(), best_end.as_str()))
            }
        };
        if better {
            best = Some(((start.to_owned(), end.to_owned()), count));
        }
    }
    Ok(best)
}

impl Report for StationStats {
    const HEADING: &'static str = "Calculating The Most Popular Stations and Trip...";

    fn compute(table: &TripTable) -> Result<Self> {
        let missing = |what: &str| BikeshareError::DataProcessing(format!("no {what} recorded"));

        let start_station =
            mode_str(table.column(START_STATION)?)?.ok_or_else(|| missing("start stations"))?;
        let end_station =
            mode_str(table.column(END_STATION)?)?.ok_or_else(|| missing("end stations"))?;
        let (trip, trip_count) = most_common_trip(table)?.ok_or_else(|| missing("trips"))?;

        Ok(Self {
            start_station,
            end_station,
            trip,
            trip_count,
        })
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most Common Start Station: {}", self.start_station)?;
        writeln!(f, "\nMost Common End Station: {}", self.end_station)?;
        writeln!(f, "\nMost Common Start/End Station Combination: ")?;
        write!(
            f,
            "{} -> {} ({} trips)",
            self.trip.0, self.trip.1, self.trip_count
        )
    }
}
