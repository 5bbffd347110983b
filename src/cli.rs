use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::DEFAULT_SEED;

#[derive(Parser, Debug)]
#[command(name = "campus-data-synth")]
#[command(version, about = "Generate flawed sample datasets for each campus")]
pub struct Cli {
    /// Log generation details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate students, courses and assessments for each site
    Generate {
        /// Output directory
        #[arg(default_value = "raw_data")]
        output_dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Random seed; the same seed reproduces the same data
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Reference date assessment dates count back from (default: today)
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,

        /// Only generate these sites (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        include: Option<Vec<String>>,

        /// Skip these sites (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// JSON file overriding defect rates
        #[arg(short, long)]
        policy: Option<PathBuf>,
    },

    /// List output tables and their columns
    ListTables,

    /// List sites and their student ID ranges
    ListSites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<Site>_<table>.csv` file per table
    Csv,
    /// One `<Site>_<table>.jsonl` file per table
    Jsonl,
    /// A single SQLite database with one table per site and kind
    Sqlite,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
