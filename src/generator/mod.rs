//! Entity generators and the defect passes applied to them

pub mod assessment;
pub mod corrupt;
pub mod course;
pub mod dates;
pub mod defects;
pub mod pipeline;
pub mod student;

pub use assessment::{generate_assessments, Assessment, AssessmentDefect, OUTLIER_MARKS};
pub use corrupt::{mutate_case, pad_whitespace};
pub use course::{generate_courses, CodeVariant, Course};
pub use dates::{DateStyle, RecordDate};
pub use defects::DefectPlan;
pub use pipeline::{
    generate_site, generate_site_with, run, validate, DatasetSink, MemorySink, RunSummary,
    SiteDataset, SiteSummary,
};
pub use student::{generate_students, Student, StudentDefect};

use rand::seq::SliceRandom;
use rand::Rng;

/// A generated table and the number of rows it had before duplication
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTable<T> {
    pub rows: Vec<T>,
    pub base_count: usize,
}

impl<T> GeneratedTable<T> {
    /// Rows appended by the duplication pass
    pub fn duplicate_count(&self) -> usize {
        self.rows.len().saturating_sub(self.base_count)
    }
}

/// Uniform choice from a reference list (lists are checked non-empty up front)
fn pick<R: Rng + ?Sized>(items: &[&'static str], rng: &mut R) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}
