use crate::error::Result;
use crate::prompt::Console;
use crate::trips::TripTable;
use polars::prelude::*;
use std::io::{BufRead, Write};

pub const DEFAULT_PAGE_SIZE: usize = 5;

const PAGER_PROMPT: &str = "Would you like to view trip data? Enter yes or no.";

/// Writes rows as `column: value` lines, labelled by their position in the
/// filtered table.
fn write_rows<W: Write>(out: &mut W, rows: &DataFrame, first_row: usize) -> Result<()> {
    let columns = rows.get_columns();
    for offset in 0..rows.height() {
        writeln!(out, "Row {}", first_row + offset)?;
        for column in columns {
            let name = column.name().as_str();
            let label = if name.is_empty() { "#" } else { name };
            let value = column.get(offset)?;
            writeln!(out, "  {label}: {}", value.str_value())?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Shows raw rows `page_size` at a time while the user answers "yes".
///
/// Stops on "no" or once every row has been shown; any other answer is
/// rejected without moving on. Returns the number of rows printed.
///
/// # Errors
///
/// Fails on terminal I/O errors or closed input.
pub fn page_rows<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
    page_size: usize,
) -> Result<usize> {
    let frame = table.display_frame()?;
    let total = frame.height();
    let mut cursor = 0;

    while cursor < total {
        match console.ask(PAGER_PROMPT)?.as_str() {
            "yes" => {
                let rows = frame.slice(cursor as i64, page_size);
                write_rows(console.output(), &rows, cursor)?;
                cursor += page_size;
            }
            "no" => break,
            _ => console.say("Invalid response.")?,
        }
    }

    let shown = cursor.min(total);
    tracing::debug!(shown, total, "Raw data paging finished");
    Ok(shown)
}
