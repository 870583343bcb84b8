//! Descriptive statistics over a filtered [`TripTable`].
//!
//! Each reporter computes a plain value type and renders it through
//! `Display`; [`run_report`] adds the heading, timing line and separator.
//!
//! ## Tie-breaking
//!
//! Modes are taken from Polars' `value_counts`. When several values share
//! the highest count the smallest value wins (lexicographic for text,
//! numeric otherwise). Ranked category counts are ordered by descending
//! count, then by name.

mod duration;
mod station;
mod time;
mod users;

pub use duration::DurationStats;
pub use station::StationStats;
pub use time::TimeStats;
pub use users::UserStats;

use crate::error::Result;
use crate::filters::SEPARATOR;
use crate::trips::TripTable;
use polars::prelude::*;
use std::fmt::Display;
use std::io::Write;
use std::time::Instant;

const COUNTS: &str = "counts";

/// A statistics block computed from a trip table.
pub trait Report: Display + Sized {
    /// Line announcing the calculation.
    const HEADING: &'static str;

    fn compute(table: &TripTable) -> Result<Self>;
}

/// Computes and prints one report, followed by its elapsed time.
///
/// # Errors
///
/// Propagates computation failures and write errors.
pub fn run_report<R: Report, W: Write>(table: &TripTable, out: &mut W) -> Result<R> {
    writeln!(out, "\n{}\n", R::HEADING)?;
    let started = Instant::now();

    let report = R::compute(table)?;
    writeln!(out, "{report}")?;

    let elapsed = started.elapsed().as_secs_f64();
    writeln!(out, "\nThis took {elapsed:.5} seconds.")?;
    writeln!(out, "{SEPARATOR}")?;
    tracing::debug!(report = R::HEADING, elapsed, "Report finished");
    Ok(report)
}

/// Runs the four reports in their fixed order.
pub fn run_all<W: Write>(table: &TripTable, out: &mut W) -> Result<()> {
    run_report::<TimeStats, W>(table, out)?;
    run_report::<StationStats, W>(table, out)?;
    run_report::<DurationStats, W>(table, out)?;
    run_report::<UserStats, W>(table, out)?;
    Ok(())
}

fn value_counts(column: &Column) -> Result<DataFrame> {
    let series = column.as_materialized_series();
    Ok(series.value_counts(false, false, COUNTS.into(), false)?)
}

/// Picks the key with the highest count; ties go to the smallest key.
/// Null keys are skipped.
fn most_frequent<K, I>(pairs: I) -> Option<(K, usize)>
where
    K: PartialOrd,
    I: IntoIterator<Item = (Option<K>, Option<u32>)>,
{
    let mut best: Option<(K, usize)> = None;
    for (key, count) in pairs {
        let (Some(key), Some(count)) = (key, count) else {
            continue;
        };
        let count = count as usize;
        let better = match &best {
            None => true,
            Some((best_key, best_count)) => {
                count > *best_count || (count == *best_count && key < *best_key)
            }
        };
        if better {
            best = Some((key, count));
        }
    }
    best
}

/// Mode of a text column.
pub(crate) fn mode_str(column: &Column) -> Result<Option<String>> {
    let vc = value_counts(column)?;
    let values = vc.column(column.name().as_str())?.as_materialized_series();
    let counts = vc.column(COUNTS)?.as_materialized_series();
    let pairs = values.str()?.into_iter().zip(counts.u32()?.into_iter());
    Ok(most_frequent(pairs).map(|(value, _)| value.to_owned()))
}

/// Mode of an unsigned integer column (derived month and hour).
pub(crate) fn mode_u32(column: &Column) -> Result<Option<u32>> {
    let vc = value_counts(column)?;
    let values = vc.column(column.name().as_str())?.as_materialized_series();
    let counts = vc.column(COUNTS)?.as_materialized_series();
    let pairs = values.u32()?.into_iter().zip(counts.u32()?.into_iter());
    Ok(most_frequent(pairs).map(|(value, _)| value))
}

/// Mode of a numeric column, compared as floats.
pub(crate) fn mode_f64(column: &Column) -> Result<Option<f64>> {
    let floats = column.as_materialized_series().cast(&DataType::Float64)?;
    let vc = floats.value_counts(false, false, COUNTS.into(), false)?;
    let values = vc.column(floats.name().as_str())?.as_materialized_series();
    let counts = vc.column(COUNTS)?.as_materialized_series();
    let pairs = values.f64()?.into_iter().zip(counts.u32()?.into_iter());
    Ok(most_frequent(pairs).map(|(value, _)| value))
}

/// Non-null categories with their counts, most frequent first.
pub(crate) fn ranked_counts(column: &Column) -> Result<Vec<(String, usize)>> {
    let text = column.as_materialized_series().cast(&DataType::String)?;
    let vc = text.value_counts(false, false, COUNTS.into(), false)?;
    let values = vc.column(text.name().as_str())?.as_materialized_series();
    let counts = vc.column(COUNTS)?.as_materialized_series();

    let mut ranked: Vec<(String, usize)> = values
        .str()?
        .into_iter()
        .zip(counts.u32()?.into_iter())
        .filter_map(|(value, count)| {
            let value = value.filter(|v| !v.is_empty())?;
            Some((value.to_owned(), count? as usize))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(ranked)
}
