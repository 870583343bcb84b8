use clap::Parser;
use std::path::PathBuf;

/// Interactive explorer for US bikeshare trip data.
///
/// Without flags, datasets are read from the directory named in the config
/// file, or the current directory.
#[derive(Parser, Debug)]
#[command(name = "bikeshare", about = "Explore US bikeshare trip data")]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
