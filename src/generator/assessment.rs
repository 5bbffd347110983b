//! Assessment table generation.
//!
//! Assessments are composed from already generated student and course rows of
//! the same site. Identifiers and codes are copied as stored, so surface
//! variants and padded programs flow through to the joins downstream.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::debug;

use super::course::Course;
use super::dates::{DateStyle, RecordDate};
use super::defects::{append_duplicates, DefectPlan};
use super::student::Student;
use super::{pick, GeneratedTable};
use crate::config::DefectPolicy;
use crate::error::{SynthError, SynthResult};
use crate::reference::{Site, ACADEMIC_YEARS, ASSESSMENT_TYPES};
use crate::rng::{Pass, SeedContext};

/// Marks drawn on the outlier branch; all fall outside `[0, 100]`
pub const OUTLIER_MARKS: [f64; 4] = [120.0, -5.0, 150.0, -10.0];

const MARK_MEAN: f64 = 65.0;
const MARK_STD_DEV: f64 = 15.0;

/// Upper bound on the courses sampled when a program has no matching course
const MAX_FALLBACK_COURSES: usize = 6;

/// Assessment dates fall within this many days before the reference date
const DATE_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "Course_Code")]
    pub course_code: String,
    #[serde(rename = "Assessment_Type")]
    pub assessment_type: &'static str,
    #[serde(rename = "Mark")]
    pub mark: Option<f64>,
    #[serde(rename = "Assessment_Date")]
    pub assessment_date: RecordDate,
    #[serde(rename = "Academic_Year")]
    pub academic_year: &'static str,
    #[serde(rename = "Semester")]
    pub semester: u8,
    #[serde(rename = "Attendance_Rate")]
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentDefect {
    MissingMark,
    /// Date rewritten as `DD/MM/YYYY`
    DayFirstDate,
}

impl AssessmentDefect {
    fn inject(row: &mut Assessment, defect: AssessmentDefect) {
        match defect {
            AssessmentDefect::MissingMark => row.mark = None,
            AssessmentDefect::DayFirstDate => {
                row.assessment_date = row.assessment_date.restyled(DateStyle::DayFirst)
            }
        }
    }
}

/// Generate assessments for every student row (duplicates included), then
/// blank marks, duplicate rows and finally rewrite a share of dates. The date
/// pass samples after duplication, so copies may differ in format from their
/// originals.
pub fn generate_assessments(
    site: Site,
    students: &[Student],
    courses: &[Course],
    policy: &DefectPolicy,
    seeds: &SeedContext,
    as_of: NaiveDate,
) -> SynthResult<GeneratedTable<Assessment>> {
    let marks = Normal::new(MARK_MEAN, MARK_STD_DEV)
        .map_err(|e| SynthError::FatalConfiguration(format!("mark distribution: {}", e)))?;

    let mut rng = seeds.stream(site, Pass::AssessmentBase);
    let mut base = Vec::new();
    let mut fallbacks = 0usize;

    for student in students {
        let (min, max) = policy.courses_per_student;
        let wanted = rng.gen_range(min..=max);

        let pool = match program_courses(courses, student.program.trim()) {
            Ok(pool) => pool,
            Err(SynthError::CatalogGap { program }) => {
                debug!(site = %site, program = %program, "No program courses, sampling whole catalog");
                fallbacks += 1;
                courses
                    .choose_multiple(&mut rng, MAX_FALLBACK_COURSES.min(courses.len()))
                    .collect()
            }
            Err(other) => return Err(other),
        };

        let selected: Vec<&Course> = pool
            .choose_multiple(&mut rng, wanted.min(pool.len()))
            .copied()
            .collect();

        for course in selected {
            let (min, max) = policy.assessments_per_course;
            for _ in 0..rng.gen_range(min..=max) {
                base.push(draw_assessment(student, course, policy, &marks, as_of, &mut rng));
            }
        }
    }

    let base_count = base.len();
    let mark_plan = DefectPlan::uniform(
        base_count,
        policy.missing_mark_fraction,
        AssessmentDefect::MissingMark,
        &mut seeds.stream(site, Pass::AssessmentMarks),
    );
    let mut rows = mark_plan.apply(base, AssessmentDefect::inject);

    let duplicates = append_duplicates(
        &mut rows,
        policy.assessment_duplicates,
        &mut seeds.stream(site, Pass::AssessmentDuplicates),
    );

    let date_plan = DefectPlan::uniform(
        rows.len(),
        policy.date_day_first_fraction,
        AssessmentDefect::DayFirstDate,
        &mut seeds.stream(site, Pass::AssessmentDates),
    );
    let rows = date_plan.apply(rows, AssessmentDefect::inject);

    debug!(
        site = %site,
        base = base_count,
        missing_marks = mark_plan.len(),
        duplicates,
        day_first_dates = date_plan.len(),
        fallbacks,
        "Generated assessments"
    );

    Ok(GeneratedTable { rows, base_count })
}

/// Courses whose program tag equals `program` exactly
fn program_courses<'a>(courses: &'a [Course], program: &str) -> SynthResult<Vec<&'a Course>> {
    let matching: Vec<&Course> = courses.iter().filter(|c| c.program == program).collect();
    if matching.is_empty() {
        return Err(SynthError::CatalogGap {
            program: program.to_string(),
        });
    }
    Ok(matching)
}

fn draw_assessment<R: Rng + ?Sized>(
    student: &Student,
    course: &Course,
    policy: &DefectPolicy,
    marks: &Normal<f64>,
    as_of: NaiveDate,
    rng: &mut R,
) -> Assessment {
    let assessment_type = pick(ASSESSMENT_TYPES, rng);

    let mark = if rng.gen_bool(policy.mark_outlier) {
        OUTLIER_MARKS[rng.gen_range(0..OUTLIER_MARKS.len())]
    } else {
        round1(marks.sample(rng).clamp(0.0, 100.0))
    };

    let days_ago = rng.gen_range(1..=DATE_WINDOW_DAYS);
    let date = as_of - Duration::days(days_ago);

    let academic_year = pick(ACADEMIC_YEARS, rng);
    let semester = rng.gen_range(1..=2);

    let attendance_rate = if rng.gen_bool(policy.missing_attendance) {
        None
    } else {
        Some(round1(rng.gen_range(60.0..=100.0)))
    };

    Assessment {
        student_id: student.student_id.clone(),
        course_code: course.course_code.clone(),
        assessment_type,
        mark: Some(mark),
        assessment_date: RecordDate::iso(date),
        academic_year,
        semester,
        attendance_rate,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_courses, generate_students};
    use std::collections::HashSet;

    const AS_OF: (i32, u32, u32) = (2025, 11, 20);

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(AS_OF.0, AS_OF.1, AS_OF.2).unwrap()
    }

    fn fixture(policy: &DefectPolicy) -> (Vec<Student>, Vec<Course>) {
        let seeds = SeedContext::new(42);
        let students = generate_students(Site::Huye, 200, policy, &seeds).rows;
        let courses = generate_courses(Site::Huye, policy, &seeds).rows;
        (students, courses)
    }

    fn generate(policy: &DefectPolicy) -> (Vec<Student>, Vec<Course>, GeneratedTable<Assessment>) {
        let (students, courses) = fixture(policy);
        let table = generate_assessments(
            Site::Huye,
            &students,
            &courses,
            policy,
            &SeedContext::new(42),
            as_of(),
        )
        .unwrap();
        (students, courses, table)
    }

    #[test]
    fn test_row_count_includes_duplicates() {
        let (_, _, table) = generate(&DefectPolicy::default());
        let extra = table.rows.len() - table.base_count;
        assert!((10..=15).contains(&extra), "got {} duplicates", extra);
    }

    #[test]
    fn test_marks_are_outliers_or_in_range() {
        let (_, _, table) = generate(&DefectPolicy::default());
        for mark in table.rows.iter().filter_map(|a| a.mark) {
            assert!(
                OUTLIER_MARKS.contains(&mark) || (0.0..=100.0).contains(&mark),
                "unexpected mark {}",
                mark
            );
        }
    }

    #[test]
    fn test_outlier_branch_only_uses_fixed_values() {
        let policy = DefectPolicy {
            mark_outlier: 1.0,
            ..DefectPolicy::clean()
        };
        let (_, _, table) = generate(&policy);
        assert!(table
            .rows
            .iter()
            .all(|a| a.mark.map_or(false, |m| OUTLIER_MARKS.contains(&m))));
    }

    #[test]
    fn test_missing_marks_in_base_rows() {
        let (_, _, table) = generate(&DefectPolicy::default());
        let missing = table.rows[..table.base_count]
            .iter()
            .filter(|a| a.mark.is_none())
            .count();
        assert_eq!(missing, (table.base_count as f64 * 0.08) as usize);
    }

    #[test]
    fn test_day_first_dates_sampled_after_duplication() {
        let (_, _, table) = generate(&DefectPolicy::default());
        let day_first = table
            .rows
            .iter()
            .filter(|a| a.assessment_date.style == DateStyle::DayFirst)
            .count();
        assert_eq!(day_first, (table.rows.len() as f64 * 0.2) as usize);
    }

    #[test]
    fn test_dates_within_past_year() {
        let (_, _, table) = generate(&DefectPolicy::default());
        let earliest = as_of() - Duration::days(365);
        for a in &table.rows {
            assert!(a.assessment_date.date >= earliest);
            assert!(a.assessment_date.date < as_of());
        }
    }

    #[test]
    fn test_attendance_range() {
        let (_, _, table) = generate(&DefectPolicy::default());
        for rate in table.rows.iter().filter_map(|a| a.attendance_rate) {
            assert!((60.0..=100.0).contains(&rate));
        }
    }

    #[test]
    fn test_rows_reference_students_and_program_courses() {
        let (students, courses, table) = generate(&DefectPolicy::default());
        let ids: HashSet<&str> = students.iter().map(|s| s.student_id.as_str()).collect();

        for a in &table.rows {
            assert!(ids.contains(a.student_id.as_str()));
            let course = courses.iter().find(|c| c.course_code == a.course_code).unwrap();
            let student = students.iter().find(|s| s.student_id == a.student_id).unwrap();
            assert_eq!(course.program, student.program.trim());
        }
    }

    #[test]
    fn test_per_student_course_counts() {
        let policy = DefectPolicy::clean();
        let (students, _, table) = generate(&policy);

        for student in &students {
            let rows: Vec<&Assessment> = table
                .rows
                .iter()
                .filter(|a| a.student_id == student.student_id)
                .collect();
            let distinct: HashSet<&str> = rows.iter().map(|a| a.course_code.as_str()).collect();
            // Tourism and Architecture only offer three courses
            assert!((3..=6).contains(&distinct.len()));
            assert!(rows.len() >= distinct.len() * 2 && rows.len() <= distinct.len() * 3);
        }
    }

    #[test]
    fn test_unmatched_program_falls_back_to_whole_catalog() {
        let policy = DefectPolicy::clean();
        let (mut students, courses) = fixture(&policy);
        students.truncate(10);
        for s in &mut students {
            s.program = "Nursing".to_string();
        }

        let table = generate_assessments(
            Site::Huye,
            &students,
            &courses,
            &policy,
            &SeedContext::new(42),
            as_of(),
        )
        .unwrap();

        for student in &students {
            let distinct: HashSet<&str> = table
                .rows
                .iter()
                .filter(|a| a.student_id == student.student_id)
                .map(|a| a.course_code.as_str())
                .collect();
            assert!((4..=6).contains(&distinct.len()));
        }
    }

    #[test]
    fn test_fallback_clamps_to_small_catalog() {
        let policy = DefectPolicy::clean();
        let (mut students, courses) = fixture(&policy);
        students.truncate(5);
        for s in &mut students {
            s.program = "Nursing".to_string();
        }
        let small: Vec<Course> = courses.into_iter().take(3).collect();

        let table = generate_assessments(
            Site::Huye,
            &students,
            &small,
            &policy,
            &SeedContext::new(42),
            as_of(),
        )
        .unwrap();

        for student in &students {
            let distinct: HashSet<&str> = table
                .rows
                .iter()
                .filter(|a| a.student_id == student.student_id)
                .map(|a| a.course_code.as_str())
                .collect();
            assert_eq!(distinct.len(), 3);
        }
    }

    #[test]
    fn test_program_lookup_reports_catalog_gap() {
        let (_, courses) = fixture(&DefectPolicy::default());
        let err = program_courses(&courses, "Nursing").unwrap_err();
        assert_eq!(
            err,
            SynthError::CatalogGap {
                program: "Nursing".to_string()
            }
        );
        assert_eq!(program_courses(&courses, "Architecture").unwrap().len(), 3);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(64.26), 64.3);
        assert_eq!(round1(100.0), 100.0);
        assert_eq!(round1(0.04), 0.0);
    }
}
