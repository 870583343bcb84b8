//! # Bikeshare Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (file + stderr)
//!   ├─> Load config, apply --data-dir
//!   └─> Run the interactive session on stdin/stdout
//! ```
//!
//! Closing standard input ends the program normally.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stderr)] // Allow eprintln! in main binary

mod cli;

use anyhow::Result;
use bikeshare::config::load_app_config;
use bikeshare::error::BikeshareError;
use bikeshare::prompt::Console;
use bikeshare::session::Session;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    if let Err(e) = bikeshare::logging::init() {
        eprintln!("Logging disabled: {e:#}");
    }

    let config = load_app_config(cli.config.as_deref(), cli.data_dir)?;
    tracing::info!(data_dir = %config.data_dir.display(), "Starting bikeshare session");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());

    match Session::new(&config, console).run() {
        Ok(passes) => {
            tracing::info!(passes, "Session finished");
            Ok(())
        }
        Err(BikeshareError::Aborted) => {
            tracing::info!("Input closed, exiting");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Session failed: {e}");
            Err(e.into())
        }
    }
}
