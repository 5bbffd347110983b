use anyhow::{Context, Result};
use ::csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::publish_staged;
use super::value::TableRow;
use crate::generator::{DatasetSink, SiteDataset};
use crate::reference::Site;

pub const CSV_EXTENSION: &str = "csv";

/// Writes `<Site>_<table>.csv` files with a header row; missing values are
/// empty fields
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).context("Failed to create output directory")?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn path_for<T: TableRow>(&self, site: Site) -> PathBuf {
        self.output_dir.join(T::schema().file_name(site, CSV_EXTENSION))
    }

    /// Write rows to a temporary sibling of the final path
    fn stage<T: TableRow>(&self, site: Site, rows: &[T]) -> Result<(PathBuf, PathBuf)> {
        let target = self.path_for::<T>(site);
        let staged = target.with_extension(format!("{}.tmp", CSV_EXTENSION));

        // Header comes from the schema so empty tables still get one
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&staged)
            .with_context(|| format!("Failed to create file: {:?}", staged))?;
        writer.write_record(T::schema().column_names())?;

        for row in rows {
            writer.serialize(row).context("Failed to serialize row")?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write: {:?}", staged))?;

        Ok((staged, target))
    }
}

impl DatasetSink for CsvSink {
    fn accept(&mut self, dataset: SiteDataset) -> Result<()> {
        let site = dataset.site;
        publish_staged(vec![
            self.stage(site, &dataset.students.rows),
            self.stage(site, &dataset.courses.rows),
            self.stage(site, &dataset.assessments.rows),
        ])?;

        info!(site = %site, dir = ?self.output_dir, "Wrote site to CSV");
        Ok(())
    }
}
