//! Per-site orchestration: courses, then students, then assessments

use anyhow::{Context, Result};
use rand::Rng;
use tracing::info;

use super::assessment::{generate_assessments, Assessment};
use super::course::{generate_courses, Course};
use super::student::{generate_students, Student};
use super::GeneratedTable;
use crate::config::GeneratorConfig;
use crate::error::SynthResult;
use crate::reference::{validate_catalog, Site};
use crate::rng::{Pass, SeedContext};

/// The three tables generated for one site
#[derive(Debug, Clone, PartialEq)]
pub struct SiteDataset {
    pub site: Site,
    pub courses: GeneratedTable<Course>,
    pub students: GeneratedTable<Student>,
    pub assessments: GeneratedTable<Assessment>,
}

/// Receives complete site datasets; never sees a partially generated site
pub trait DatasetSink {
    fn accept(&mut self, dataset: SiteDataset) -> Result<()>;

    /// Called once after the last site
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps datasets in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub datasets: Vec<SiteDataset>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetSink for MemorySink {
    fn accept(&mut self, dataset: SiteDataset) -> Result<()> {
        self.datasets.push(dataset);
        Ok(())
    }
}

/// Row counts for one generated site
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub site: Site,
    pub students: usize,
    pub student_duplicates: usize,
    pub courses: usize,
    pub assessments: usize,
    pub assessment_duplicates: usize,
}

impl SiteSummary {
    fn of(dataset: &SiteDataset) -> Self {
        Self {
            site: dataset.site,
            students: dataset.students.rows.len(),
            student_duplicates: dataset.students.duplicate_count(),
            courses: dataset.courses.rows.len(),
            assessments: dataset.assessments.rows.len(),
            assessment_duplicates: dataset.assessments.duplicate_count(),
        }
    }

    pub fn total_rows(&self) -> usize {
        self.students + self.courses + self.assessments
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub sites: Vec<SiteSummary>,
}

impl RunSummary {
    pub fn total_rows(&self) -> usize {
        self.sites.iter().map(SiteSummary::total_rows).sum()
    }
}

/// Check the reference catalogs and the configuration
pub fn validate(config: &GeneratorConfig) -> SynthResult<()> {
    validate_catalog()?;
    config.validate()
}

/// Generate one site, drawing its student count from the configured range
pub fn generate_site(config: &GeneratorConfig, site: Site) -> SynthResult<SiteDataset> {
    validate(config)?;
    let seeds = SeedContext::new(config.seed);
    let (min, max) = config.student_count;
    let count = seeds.stream(site, Pass::StudentCount).gen_range(min..=max);
    generate_site_with(config, site, count)
}

/// Generate one site with a fixed base student count
pub fn generate_site_with(
    config: &GeneratorConfig,
    site: Site,
    student_count: usize,
) -> SynthResult<SiteDataset> {
    validate(config)?;
    let seeds = SeedContext::new(config.seed);
    let policy = &config.policy;

    let courses = generate_courses(site, policy, &seeds);
    let students = generate_students(site, student_count, policy, &seeds);
    let assessments = generate_assessments(
        site,
        &students.rows,
        &courses.rows,
        policy,
        &seeds,
        config.as_of,
    )?;

    info!(
        site = %site,
        seed = seeds.seed(),
        students = students.rows.len(),
        courses = courses.rows.len(),
        assessments = assessments.rows.len(),
        "Generated site"
    );

    Ok(SiteDataset {
        site,
        courses,
        students,
        assessments,
    })
}

/// Validate the reference data and configuration, then generate each site in
/// order and hand it to the sink. The first error aborts the run.
pub fn run(
    config: &GeneratorConfig,
    sites: &[Site],
    sink: &mut dyn DatasetSink,
) -> Result<RunSummary> {
    validate(config).context("Configuration check failed")?;

    let mut summary = RunSummary::default();

    for &site in sites {
        let dataset = generate_site(config, site)
            .with_context(|| format!("Failed to generate data for {}", site))?;
        let site_summary = SiteSummary::of(&dataset);

        sink.accept(dataset)
            .with_context(|| format!("Failed to write data for {}", site))?;
        summary.sites.push(site_summary);
    }

    sink.finish()?;
    Ok(summary)
}
