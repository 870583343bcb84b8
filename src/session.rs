//! One interactive run: filters, load, reports, raw rows, restart.

use crate::config::AppConfig;
use crate::error::Result;
use crate::loader::load_trips;
use crate::pager::page_rows;
use crate::prompt::{Console, get_filters};
use crate::stats;
use std::io::{BufRead, Write};

const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.";

pub struct Session<'a, R, W> {
    config: &'a AppConfig,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(config: &'a AppConfig, console: Console<R, W>) -> Self {
        Self { config, console }
    }

    /// One full pass. The dataset is loaded fresh every time.
    pub fn run_once(&mut self) -> Result<()> {
        let selection = get_filters(&mut self.console)?;
        let table = load_trips(&self.config.data_dir, &selection)?;

        if table.is_empty() {
            tracing::warn!("No rows left after filtering for {selection:?}");
            self.console.say("\nNo trips match the selected filters.")?;
            return Ok(());
        }

        stats::run_all(&table, self.console.output())?;
        page_rows(&mut self.console, &table, self.config.page_size)?;
        Ok(())
    }

    /// Repeats passes until the restart answer is anything but "yes".
    /// Returns the number of completed passes.
    ///
    /// # Errors
    ///
    /// Any fatal load or report error ends the session.
    pub fn run(&mut self) -> Result<usize> {
        let mut passes = 0;
        loop {
            self.run_once()?;
            passes += 1;

            let restart = self.console.ask(RESTART_PROMPT)?;
            if restart != "yes" {
                break;
            }
            tracing::info!(passes, "Restarting session");
        }
        Ok(passes)
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
