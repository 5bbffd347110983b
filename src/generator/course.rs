//! Course table generation from the static catalog

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::corrupt::pad_whitespace;
use super::defects::DefectPlan;
use super::GeneratedTable;
use crate::config::DefectPolicy;
use crate::reference::{level_from_code, CatalogCourse, Site, COURSE_CATALOG};
use crate::rng::{Pass, SeedContext};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    #[serde(rename = "Course_Code")]
    pub course_code: String,
    #[serde(rename = "Course_Title")]
    pub course_title: String,
    #[serde(rename = "Credits")]
    pub credits: Option<u8>,
    #[serde(rename = "Program")]
    pub program: &'static str,
    #[serde(rename = "Level")]
    pub level: u8,
    #[serde(rename = "Semester")]
    pub semester: u8,
}

/// Surface encodings a course code may be stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeVariant {
    Canonical,
    /// `ICT101` -> `ICT-101`
    Dashed,
    /// `ICT101` -> `ict101`
    Lowercase,
    /// `ICT101` -> `ICT1O1`
    ZeroAsLetter,
}

impl CodeVariant {
    pub const ALL: [CodeVariant; 4] = [
        CodeVariant::Canonical,
        CodeVariant::Dashed,
        CodeVariant::Lowercase,
        CodeVariant::ZeroAsLetter,
    ];

    pub fn render(&self, code: &str) -> String {
        match self {
            CodeVariant::Canonical => code.to_string(),
            CodeVariant::Dashed => match code.find(|c: char| c.is_ascii_digit()) {
                Some(split) if split > 0 => format!("{}-{}", &code[..split], &code[split..]),
                _ => code.to_string(),
            },
            CodeVariant::Lowercase => code.to_lowercase(),
            CodeVariant::ZeroAsLetter => code.replace('0', "O"),
        }
    }
}

/// Field blanked by the course absence pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseDefect {
    MissingCredits,
}

/// One row per catalog entry, in catalog order. Codes may be stored under a
/// surface variant while the level always comes from the canonical code.
pub fn generate_courses(
    site: Site,
    policy: &DefectPolicy,
    seeds: &SeedContext,
) -> GeneratedTable<Course> {
    let mut rng = seeds.stream(site, Pass::CourseBase);
    let base: Vec<Course> = COURSE_CATALOG
        .iter()
        .flat_map(|entry| entry.courses.iter().map(move |c| (entry.program, c)))
        .map(|(program, entry)| base_course(program, entry, policy, &mut rng))
        .collect();
    let base_count = base.len();

    let plan = DefectPlan::uniform(
        base_count,
        policy.missing_credits_fraction,
        CourseDefect::MissingCredits,
        &mut seeds.stream(site, Pass::CourseCredits),
    );
    if !plan.is_empty() {
        debug!(site = %site, missing_credits = plan.len(), "Blanked course credits");
    }

    let rows = plan.apply(base, |course, defect| match defect {
        CourseDefect::MissingCredits => course.credits = None,
    });

    GeneratedTable { rows, base_count }
}

fn base_course<R: Rng + ?Sized>(
    program: &'static str,
    entry: &CatalogCourse,
    policy: &DefectPolicy,
    rng: &mut R,
) -> Course {
    let variant = if rng.gen_bool(policy.course_code_variant) {
        CodeVariant::ALL[rng.gen_range(0..CodeVariant::ALL.len())]
    } else {
        CodeVariant::Canonical
    };

    Course {
        course_code: variant.render(entry.code),
        course_title: pad_whitespace(entry.title, policy.course_title_padding, rng),
        credits: Some(entry.credits),
        program,
        level: level_from_code(entry.code),
        semester: rng.gen_range(1..=2),
    }
}
