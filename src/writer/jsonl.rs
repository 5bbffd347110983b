use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::publish_staged;
use super::value::TableRow;
use crate::generator::{DatasetSink, SiteDataset};
use crate::reference::Site;

pub const EXTENSION: &str = "jsonl";

/// Writes `<Site>_<table>.jsonl` files, one JSON object per row
pub struct JsonlSink {
    output_dir: PathBuf,
}

impl JsonlSink {
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).context("Failed to create output directory")?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn path_for<T: TableRow>(&self, site: Site) -> PathBuf {
        self.output_dir.join(T::schema().file_name(site, EXTENSION))
    }

    /// Write rows to a temporary sibling of the final path
    fn stage<T: TableRow>(&self, site: Site, rows: &[T]) -> Result<(PathBuf, PathBuf)> {
        let target = self.path_for::<T>(site);
        let staged = target.with_extension(format!("{}.tmp", EXTENSION));

        let file = File::create(&staged)
            .with_context(|| format!("Failed to create file: {:?}", staged))?;
        let mut writer = BufWriter::new(file);

        for row in rows {
            serde_json::to_writer(&mut writer, row).context("Failed to serialize row")?;
            writer.write_all(b"\n")?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write: {:?}", staged))?;

        Ok((staged, target))
    }
}

impl DatasetSink for JsonlSink {
    /// Stage all three files first; the final names only appear once every
    /// table of the site has been written.
    fn accept(&mut self, dataset: SiteDataset) -> Result<()> {
        let site = dataset.site;
        publish_staged(vec![
            self.stage(site, &dataset.students.rows),
            self.stage(site, &dataset.courses.rows),
            self.stage(site, &dataset.assessments.rows),
        ])?;

        info!(site = %site, dir = ?self.output_dir, "Wrote site to JSONL");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::generator::{generate_site_with, Student};
    use crate::schema::STUDENTS;
    use chrono::NaiveDate;
    use std::io::{BufRead, BufReader};

    fn dataset() -> SiteDataset {
        let config = GeneratorConfig::new(42, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        generate_site_with(&config, Site::Kigali, 30).unwrap()
    }

    #[test]
    fn test_writes_three_files_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlSink::new(dir.path()).unwrap();
        sink.accept(dataset()).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "Kigali_assessments.jsonl",
                "Kigali_courses.jsonl",
                "Kigali_students.jsonl"
            ]
        );
    }

    #[test]
    fn test_failed_move_leaves_no_site_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlSink::new(dir.path()).unwrap();

        // A non-empty directory at the courses target makes its rename fail
        let blocker = sink.path_for::<crate::generator::Course>(Site::Kigali);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), b"x").unwrap();

        assert!(sink.accept(dataset()).is_err());

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Kigali_courses.jsonl"]);
        assert!(blocker.is_dir());
    }

    #[test]
    fn test_keys_in_column_order_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlSink::new(dir.path()).unwrap();
        let data = dataset();
        let rows = data.students.rows.len();
        sink.accept(data).unwrap();

        let file = File::open(sink.path_for::<Student>(Site::Kigali)).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), rows);

        for line in &lines {
            let positions: Vec<usize> = STUDENTS
                .column_names()
                .iter()
                .map(|c| line.find(&format!("\"{}\":", c)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
        assert!(lines.iter().any(|l| l.contains("\"Phone\":null")
            || l.contains("\"Gender\":null")
            || l.contains("\"DOB\":null")));
    }
}
