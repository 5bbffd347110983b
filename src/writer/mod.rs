pub mod csv;
pub mod jsonl;
pub mod schema_gen;
pub mod sqlite;
pub mod value;

pub use self::csv::*;
pub use jsonl::*;
pub use sqlite::*;
pub use value::*;

use anyhow::{Context, Result};
use indicatif::ProgressStyle;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::generator::DatasetSink;

/// SQLite database file created inside the output directory
pub const SQLITE_FILE: &str = "campus_data.db";

/// Open the sink for the requested output format
pub fn open_sink(format: OutputFormat, output_dir: &Path) -> Result<Box<dyn DatasetSink>> {
    match format {
        OutputFormat::Csv => Ok(Box::new(CsvSink::new(output_dir)?)),
        OutputFormat::Jsonl => Ok(Box::new(JsonlSink::new(output_dir)?)),
        OutputFormat::Sqlite => {
            std::fs::create_dir_all(output_dir)?;
            Ok(Box::new(SqliteSink::new(&output_dir.join(SQLITE_FILE))?))
        }
    }
}

fn progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template("{msg:30} [{bar:40.cyan/blue}] {pos}/{len}")?
        .progress_chars("=>-"))
}

/// Move staged `(tmp, target)` files into place once every table of a site
/// was written. On any failure nothing of the site stays visible: staged
/// files are removed and targets already moved are deleted again.
fn publish_staged(results: Vec<Result<(PathBuf, PathBuf)>>) -> Result<()> {
    let mut staged = Vec::with_capacity(results.len());
    let mut failure = None;
    for result in results {
        match result {
            Ok(paths) => staged.push(paths),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }

    if let Some(err) = failure {
        discard(staged.iter().map(|(tmp, _)| tmp));
        return Err(err);
    }

    for (i, (tmp, target)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, target) {
            discard(staged[..i].iter().map(|(_, target)| target));
            discard(staged[i..].iter().map(|(tmp, _)| tmp));
            return Err(e).with_context(|| format!("Failed to move {:?} into place", target));
        }
    }

    Ok(())
}

fn discard<'a>(paths: impl Iterator<Item = &'a PathBuf>) {
    for path in paths {
        fs::remove_file(path).ok();
    }
}
