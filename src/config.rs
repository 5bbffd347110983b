//! Generator configuration and defect-injection rates

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SynthError, SynthResult};

/// Seed used when none is given; re-running with it reproduces the same data
pub const DEFAULT_SEED: u64 = 42;

/// Rates and ranges for every defect category the generators inject.
///
/// Probabilities are per record (or per field) draws; fractions are the share
/// of a finished table selected by an index sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefectPolicy {
    // Students
    pub first_name_typo: f64,
    pub last_name_typo: f64,
    pub program_padding: f64,
    /// Probability a DOB is rendered day-first
    pub dob_day_first: f64,
    /// Share of base students missing one of gender/phone/DOB
    pub student_missing_fraction: f64,
    pub student_duplicates: (usize, usize),

    // Courses
    pub course_code_variant: f64,
    pub course_title_padding: f64,
    pub missing_credits_fraction: f64,

    // Assessments
    pub courses_per_student: (usize, usize),
    pub assessments_per_course: (usize, usize),
    pub mark_outlier: f64,
    pub missing_attendance: f64,
    pub missing_mark_fraction: f64,
    pub assessment_duplicates: (usize, usize),
    pub date_day_first_fraction: f64,
}

impl Default for DefectPolicy {
    fn default() -> Self {
        Self {
            first_name_typo: 0.08,
            last_name_typo: 0.05,
            program_padding: 0.10,
            dob_day_first: 0.10,
            student_missing_fraction: 0.12,
            student_duplicates: (5, 8),
            course_code_variant: 0.30,
            course_title_padding: 0.15,
            missing_credits_fraction: 0.10,
            courses_per_student: (4, 6),
            assessments_per_course: (2, 3),
            mark_outlier: 0.05,
            missing_attendance: 0.10,
            missing_mark_fraction: 0.08,
            assessment_duplicates: (10, 15),
            date_day_first_fraction: 0.20,
        }
    }
}

impl DefectPolicy {
    /// A policy that injects nothing; base tables come out clean
    pub fn clean() -> Self {
        Self {
            first_name_typo: 0.0,
            last_name_typo: 0.0,
            program_padding: 0.0,
            dob_day_first: 0.0,
            student_missing_fraction: 0.0,
            student_duplicates: (0, 0),
            course_code_variant: 0.0,
            course_title_padding: 0.0,
            missing_credits_fraction: 0.0,
            mark_outlier: 0.0,
            missing_attendance: 0.0,
            missing_mark_fraction: 0.0,
            assessment_duplicates: (0, 0),
            date_day_first_fraction: 0.0,
            ..Default::default()
        }
    }

    /// Load a policy from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file: {:?}", path))?;
        let policy: DefectPolicy =
            serde_json::from_str(&text).context("Failed to parse policy file")?;
        Ok(policy)
    }

    pub fn validate(&self) -> SynthResult<()> {
        let rates = [
            ("first_name_typo", self.first_name_typo),
            ("last_name_typo", self.last_name_typo),
            ("program_padding", self.program_padding),
            ("dob_day_first", self.dob_day_first),
            ("student_missing_fraction", self.student_missing_fraction),
            ("course_code_variant", self.course_code_variant),
            ("course_title_padding", self.course_title_padding),
            ("missing_credits_fraction", self.missing_credits_fraction),
            ("mark_outlier", self.mark_outlier),
            ("missing_attendance", self.missing_attendance),
            ("missing_mark_fraction", self.missing_mark_fraction),
            ("date_day_first_fraction", self.date_day_first_fraction),
        ];

        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(SynthError::FatalConfiguration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let ranges = [
            ("student_duplicates", self.student_duplicates),
            ("courses_per_student", self.courses_per_student),
            ("assessments_per_course", self.assessments_per_course),
            ("assessment_duplicates", self.assessment_duplicates),
        ];

        for (name, (min, max)) in ranges {
            if min > max {
                return Err(SynthError::FatalConfiguration(format!(
                    "{} range is inverted: {}..={}",
                    name, min, max
                )));
            }
        }

        Ok(())
    }
}

/// Everything a run needs besides the site list and the output sink
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub seed: u64,
    /// Reference date assessment dates count back from
    pub as_of: NaiveDate,
    /// Inclusive range the per-site base student count is drawn from
    pub student_count: (usize, usize),
    pub policy: DefectPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            as_of: Local::now().date_naive(),
            student_count: (180, 220),
            policy: DefectPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Fully pinned configuration; two runs with equal values produce equal output
    pub fn new(seed: u64, as_of: NaiveDate) -> Self {
        Self {
            seed,
            as_of,
            ..Default::default()
        }
    }

    pub fn with_student_count(mut self, min: usize, max: usize) -> Self {
        self.student_count = (min, max);
        self
    }

    pub fn with_policy(mut self, policy: DefectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> SynthResult<()> {
        let (min, max) = self.student_count;
        if min > max {
            return Err(SynthError::FatalConfiguration(format!(
                "student_count range is inverted: {}..={}",
                min, max
            )));
        }
        self.policy.validate()
    }
}
