use crate::error::{BikeshareError, Result, ResultExt as _};
use crate::filters::{FilterSelection, Month, weekday_name};
use crate::trips::{DAY_OF_WEEK, HOUR, MONTH, REQUIRED_COLUMNS, START_TIME, TripTable};
use chrono::{Datelike as _, NaiveDateTime, Timelike as _};
use polars::prelude::*;
use std::path::Path;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Reads a dataset file, checks the required columns and adds the derived
/// `month`, `day_of_week` and `hour` columns. No filtering.
pub fn read_dataset(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_has_header(true)
        .finish()?
        .collect()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    for name in REQUIRED_COLUMNS {
        if df.get_column_index(name).is_none() {
            return Err(BikeshareError::MissingColumn(name.to_owned()));
        }
    }

    derive_time_columns(df)
}

/// Parses Start Time and appends the derived calendar columns.
pub fn derive_time_columns(mut df: DataFrame) -> Result<DataFrame> {
    let starts = df
        .column(START_TIME)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let starts = starts.str()?;

    let mut months = Vec::with_capacity(starts.len());
    let mut days = Vec::with_capacity(starts.len());
    let mut hours = Vec::with_capacity(starts.len());

    for (row, value) in starts.into_iter().enumerate() {
        let timestamp = value.and_then(parse_timestamp).ok_or_else(|| {
            BikeshareError::MalformedTimestamp {
                row,
                value: value.unwrap_or_default().to_owned(),
            }
        })?;
        if Month::from_number(timestamp.month()).is_none() {
            return Err(BikeshareError::DataProcessing(format!(
                "row {row} falls in month {}, datasets cover January to June only",
                timestamp.month()
            )));
        }
        months.push(timestamp.month());
        days.push(weekday_name(timestamp.weekday()));
        hours.push(timestamp.hour());
    }

    df.with_column(Series::new(MONTH.into(), months))?;
    df.with_column(Series::new(DAY_OF_WEEK.into(), days))?;
    df.with_column(Series::new(HOUR.into(), hours))?;
    Ok(df)
}

/// Narrows a prepared frame to the selected month and day, keeping row order.
pub fn apply_filters(df: DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
    let mut lf = df.lazy();
    if let Some(month) = selection.month.only() {
        lf = lf.filter(col(MONTH).eq(lit(month.number())));
    }
    if let Some(day) = selection.day.only() {
        lf = lf.filter(col(DAY_OF_WEEK).eq(lit(weekday_name(day))));
    }
    Ok(lf.collect()?)
}

/// Loads the selected city's dataset from `data_dir` and applies the filters.
///
/// The file is read fresh on every call.
///
/// # Errors
///
/// Fails if the file is unreadable, a required column is missing or a
/// Start Time value is not a timestamp.
pub fn load_trips(data_dir: &Path, selection: &FilterSelection) -> Result<TripTable> {
    let path = data_dir.join(selection.city.file_name());
    tracing::info!("Loading {} from {}", selection.city, path.display());

    let df = read_dataset(&path)?;
    let loaded = df.height();
    let df = apply_filters(df, selection)?;
    tracing::info!(loaded, kept = df.height(), "Dataset filtered");

    Ok(TripTable::new(selection.city, df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Choice, City};
    use crate::trips::START_STATION;
    use chrono::Weekday;

    fn frame() -> anyhow::Result<DataFrame> {
        let df = df!(
            START_TIME => &[
                "2017-01-02 09:07:57",
                "2017-03-03 08:15:00",
                "2017-03-06 17:40:00",
                "2017-06-02T08:45:00",
            ],
            START_STATION => &["A", "B", "C", "D"]
        )?;
        Ok(derive_time_columns(df)?)
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2017-01-01 00:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 00:07:57.123").is_some());
        assert!(parse_timestamp("2017-01-01T00:07:57").is_some());
        assert!(parse_timestamp("01/01/2017").is_none());
    }

    #[test]
    fn test_derived_columns() -> anyhow::Result<()> {
        let df = frame()?;
        let months: Vec<Option<u32>> = df
            .column(MONTH)?
            .as_materialized_series()
            .u32()?
            .into_iter()
            .collect();
        assert_eq!(months, [Some(1), Some(3), Some(3), Some(6)]);

        let days = df.column(DAY_OF_WEEK)?.as_materialized_series().str()?.clone();
        assert_eq!(days.get(0), Some("Monday"));
        assert_eq!(days.get(1), Some("Friday"));
        assert_eq!(days.get(3), Some("Friday"));

        let hours = df.column(HOUR)?.as_materialized_series().u32()?.clone();
        assert_eq!(hours.get(2), Some(17));
        Ok(())
    }

    #[test]
    fn test_malformed_timestamp_is_fatal() -> anyhow::Result<()> {
        let df = df!(START_TIME => &["2017-01-02 09:07:57", "not a time"])?;
        let err = derive_time_columns(df).expect_err("should reject");
        assert!(matches!(err, BikeshareError::MalformedTimestamp { row: 1, .. }));
        Ok(())
    }

    #[test]
    fn test_month_outside_dataset_range() -> anyhow::Result<()> {
        let df = df!(START_TIME => &["2017-07-04 12:00:00"])?;
        assert!(derive_time_columns(df).is_err());
        Ok(())
    }

    #[test]
    fn test_filters_all_keeps_everything() -> anyhow::Result<()> {
        let df = frame()?;
        let out = apply_filters(df.clone(), &FilterSelection::unfiltered(City::Chicago))?;
        assert_eq!(out.height(), df.height());
        Ok(())
    }

    #[test]
    fn test_filters_by_month_and_day() -> anyhow::Result<()> {
        let march = FilterSelection::new(City::Chicago, Choice::Only(Month::March), Choice::All);
        let out = apply_filters(frame()?, &march)?;
        let stations = out.column(START_STATION)?.as_materialized_series().str()?.clone();
        assert_eq!(out.height(), 2);
        assert_eq!(stations.get(0), Some("B"));
        assert_eq!(stations.get(1), Some("C"));

        let friday = FilterSelection::new(City::Chicago, Choice::All, Choice::Only(Weekday::Fri));
        let out = apply_filters(frame()?, &friday)?;
        let stations = out.column(START_STATION)?.as_materialized_series().str()?.clone();
        assert_eq!(out.height(), 2);
        assert_eq!(stations.get(0), Some("B"));
        assert_eq!(stations.get(1), Some("D"));

        let both = FilterSelection::new(
            City::Chicago,
            Choice::Only(Month::March),
            Choice::Only(Weekday::Fri),
        );
        assert_eq!(apply_filters(frame()?, &both)?.height(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_dataset_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = load_trips(dir.path(), &FilterSelection::unfiltered(City::Washington));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_column() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join("chicago.csv"),
            "Start Time,Trip Duration\n2017-01-02 09:07:57,300\n",
        )?;
        let err = load_trips(dir.path(), &FilterSelection::unfiltered(City::Chicago))
            .expect_err("End Time is required");
        assert!(matches!(err, BikeshareError::MissingColumn(ref name) if name == "End Time"));
        Ok(())
    }
}
