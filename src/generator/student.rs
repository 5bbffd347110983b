//! Student table generation

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::corrupt::{mutate_case, pad_whitespace};
use super::dates::RecordDate;
use super::defects::{append_duplicates, DefectPlan};
use super::{pick, GeneratedTable};
use crate::config::DefectPolicy;
use crate::reference::{Site, FIRST_NAMES, GENDER_OPTIONS, LAST_NAMES, PROGRAMS};
use crate::rng::{Pass, SeedContext};

pub const EMAIL_DOMAIN: &str = "rp.ac.rw";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "First_Name")]
    pub first_name: String,
    #[serde(rename = "Last_Name")]
    pub last_name: String,
    #[serde(rename = "Gender")]
    pub gender: Option<&'static str>,
    #[serde(rename = "DOB")]
    pub dob: Option<RecordDate>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Program")]
    pub program: String,
    #[serde(rename = "Level")]
    pub level: u8,
    #[serde(rename = "Intake_Year")]
    pub intake_year: u16,
}

/// Field blanked by the student absence pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentDefect {
    MissingGender,
    MissingPhone,
    MissingDob,
}

impl StudentDefect {
    pub const ALL: [StudentDefect; 3] = [
        StudentDefect::MissingGender,
        StudentDefect::MissingPhone,
        StudentDefect::MissingDob,
    ];

    fn inject(student: &mut Student, defect: StudentDefect) {
        match defect {
            StudentDefect::MissingGender => student.gender = None,
            StudentDefect::MissingPhone => student.phone = None,
            StudentDefect::MissingDob => student.dob = None,
        }
    }
}

/// Generate `count` students for a site, then blank one of gender/phone/DOB on
/// a sampled share of them and append duplicated rows.
pub fn generate_students(
    site: Site,
    count: usize,
    policy: &DefectPolicy,
    seeds: &SeedContext,
) -> GeneratedTable<Student> {
    let mut rng = seeds.stream(site, Pass::StudentBase);
    let base: Vec<Student> = (1..=count)
        .map(|seq| base_student(site, seq, policy, &mut rng))
        .collect();

    let plan = DefectPlan::partitioned(
        base.len(),
        policy.student_missing_fraction,
        &StudentDefect::ALL,
        &mut seeds.stream(site, Pass::StudentMissing),
    );
    debug!(
        site = %site,
        gender = plan.count_of(StudentDefect::MissingGender),
        phone = plan.count_of(StudentDefect::MissingPhone),
        dob = plan.count_of(StudentDefect::MissingDob),
        "Blanked student fields"
    );
    let mut rows = plan.apply(base, StudentDefect::inject);

    let duplicates = append_duplicates(
        &mut rows,
        policy.student_duplicates,
        &mut seeds.stream(site, Pass::StudentDuplicates),
    );
    debug!(site = %site, duplicates, "Duplicated student rows");

    GeneratedTable {
        rows,
        base_count: count,
    }
}

fn base_student<R: Rng + ?Sized>(
    site: Site,
    seq: usize,
    policy: &DefectPolicy,
    rng: &mut R,
) -> Student {
    let first = pick(FIRST_NAMES, rng);
    let last = pick(LAST_NAMES, rng);

    // Derived before the names are mutated; not refreshed afterwards
    let email = format!(
        "{}.{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        EMAIL_DOMAIN
    );
    let first_name = mutate_case(first, policy.first_name_typo, rng);
    let last_name = mutate_case(last, policy.last_name_typo, rng);

    let year = rng.gen_range(1998..=2005);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    let day_first = rng.gen_bool(policy.dob_day_first);
    let dob = NaiveDate::from_ymd_opt(year, month, day).map(|date| {
        if day_first {
            RecordDate::day_first(date)
        } else {
            RecordDate::iso(date)
        }
    });

    let gender = pick(GENDER_OPTIONS, rng);
    let phone = format!("250{}", rng.gen_range(720_000_000u32..=799_999_999));
    let program = pad_whitespace(pick(PROGRAMS, rng), policy.program_padding, rng);

    Student {
        student_id: site.student_id(seq),
        first_name,
        last_name,
        gender: Some(gender),
        dob,
        phone: Some(phone),
        email,
        program,
        level: rng.gen_range(1..=4),
        intake_year: rng.gen_range(2022..=2025),
    }
}
