//! # Bikeshare - US Bikeshare Data Explorer
//!
//! An interactive tool for exploring bikeshare trip records from Chicago,
//! New York City and Washington. The user picks a city and optional month
//! and day filters; the tool loads the matching trips with Polars, prints
//! descriptive statistics, pages through raw rows on request and offers to
//! start over.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikeshare::filters::{City, FilterSelection};
//! use bikeshare::loader::load_trips;
//! use bikeshare::stats::{DurationStats, run_report};
//! use std::path::Path;
//!
//! # fn example() -> bikeshare::error::Result<()> {
//! let selection = FilterSelection::unfiltered(City::Chicago);
//! let table = load_trips(Path::new("data"), &selection)?;
//!
//! let mut out = std::io::stdout();
//! let durations: DurationStats = run_report(&table, &mut out)?;
//! println!("{} trips, {} seconds in total", table.height(), durations.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`filters`]: City, month and day selections
//! - [`prompt`]: Line-based console and the filter dialogue
//! - [`loader`]: Dataset loading, derived columns and filtering
//! - [`trips`]: The in-memory trip table and its column names
//! - [`stats`]: Time, station, duration and user reports
//! - [`pager`]: Raw row display
//! - [`session`]: The restartable interactive loop
//! - [`config`], [`logging`], [`error`]: Ambient plumbing
//!
//! ## Data Flow
//!
//! ```text
//! get_filters ──> load_trips ──> run_all (time, stations, duration, users)
//!      ^                               │
//!      │                               v
//!      └──── restart? "yes" <──── page_rows
//! ```
//!
//! Every pass reloads the dataset from disk; filtering produces a new frame
//! and never touches the source file.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod filters;
pub mod loader;
pub mod logging;
pub mod pager;
pub mod prompt;
pub mod session;
pub mod stats;
pub mod trips;
