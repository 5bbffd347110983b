//! Static reference catalogs: programs, names and the course catalog

use crate::error::{SynthError, SynthResult};

// =============================================================================
// Programs and names
// =============================================================================

pub const PROGRAMS: &[&str] = &[
    "Information Technology",
    "Civil Engineering",
    "Electrical Engineering",
    "Business Administration",
    "Tourism and Hospitality",
    "Architecture",
];

pub const FIRST_NAMES: &[&str] = &[
    "Jean", "Marie", "Claude", "Grace", "Eric", "Ange", "Emmanuel", "Diane", "Patrick", "Esther",
    "David", "Sarah", "Joseph", "Aline", "Samuel", "Nadine", "Daniel", "Alice", "Moses", "Claire",
    "Isaac", "Jeanne", "Frank", "Louise", "Kevin", "Stella", "Prince", "Gloria",
];

pub const LAST_NAMES: &[&str] = &[
    "Uwimana",
    "Habimana",
    "Mugisha",
    "Niyonzima",
    "Ntawukuriryayo",
    "Bizimana",
    "Mukamana",
    "Nkurunziza",
    "Tuyisenge",
    "Mutabazi",
    "Ingabire",
    "Munyakazi",
    "Kubwimana",
    "Nsengiyumva",
    "Umuhoza",
];

/// Equivalent gender spellings; the inconsistency is intentional
pub const GENDER_OPTIONS: &[&str] = &["M", "Male", "MALE", "F", "Female", "FEMALE", "m", "f"];

pub const ASSESSMENT_TYPES: &[&str] = &["CAT", "Exam", "Assignment", "Quiz", "Project"];

pub const ACADEMIC_YEARS: &[&str] = &["2023/2024", "2024/2025", "2025/2026"];

// =============================================================================
// Course catalog
// =============================================================================

/// A course as listed in the static catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCourse {
    pub code: &'static str,
    pub title: &'static str,
    pub credits: u8,
}

impl CatalogCourse {
    pub const fn new(code: &'static str, title: &'static str, credits: u8) -> Self {
        Self {
            code,
            title,
            credits,
        }
    }
}

/// Courses offered by one program
#[derive(Debug, Clone)]
pub struct ProgramCourses {
    pub program: &'static str,
    pub courses: &'static [CatalogCourse],
}

pub static COURSE_CATALOG: &[ProgramCourses] = &[
    ProgramCourses {
        program: "Information Technology",
        courses: &[
            CatalogCourse::new("ICT101", "Programming Fundamentals", 4),
            CatalogCourse::new("ICT102", "Database Systems", 4),
            CatalogCourse::new("ICT103", "Web Development", 3),
            CatalogCourse::new("ICT201", "Data Structures", 4),
            CatalogCourse::new("ICT202", "Network Security", 3),
            CatalogCourse::new("ICT301", "Software Engineering", 4),
        ],
    },
    ProgramCourses {
        program: "Civil Engineering",
        courses: &[
            CatalogCourse::new("CE101", "Engineering Mathematics", 5),
            CatalogCourse::new("CE102", "Structural Analysis", 4),
            CatalogCourse::new("CE103", "Construction Materials", 3),
            CatalogCourse::new("CE201", "Hydraulics", 4),
            CatalogCourse::new("CE202", "Soil Mechanics", 4),
        ],
    },
    ProgramCourses {
        program: "Electrical Engineering",
        courses: &[
            CatalogCourse::new("EE101", "Circuit Theory", 4),
            CatalogCourse::new("EE102", "Electronics Basics", 4),
            CatalogCourse::new("EE103", "Power Systems", 3),
            CatalogCourse::new("EE201", "Control Systems", 4),
        ],
    },
    ProgramCourses {
        program: "Business Administration",
        courses: &[
            CatalogCourse::new("BA101", "Principles of Management", 3),
            CatalogCourse::new("BA102", "Marketing Fundamentals", 3),
            CatalogCourse::new("BA103", "Financial Accounting", 4),
            CatalogCourse::new("BA201", "Business Statistics", 4),
        ],
    },
    ProgramCourses {
        program: "Tourism and Hospitality",
        courses: &[
            CatalogCourse::new("TH101", "Tourism Management", 3),
            CatalogCourse::new("TH102", "Hotel Operations", 3),
            CatalogCourse::new("TH103", "Food and Beverage", 3),
        ],
    },
    ProgramCourses {
        program: "Architecture",
        courses: &[
            CatalogCourse::new("AR101", "Architectural Design", 4),
            CatalogCourse::new("AR102", "Building Technology", 4),
            CatalogCourse::new("AR103", "Urban Planning", 3),
        ],
    },
];

/// Look up the courses offered by a program
pub fn courses_for(program: &str) -> Option<&'static [CatalogCourse]> {
    COURSE_CATALOG
        .iter()
        .find(|entry| entry.program == program)
        .map(|entry| entry.courses)
}

/// Total number of catalog entries across all programs
pub fn catalog_size() -> usize {
    COURSE_CATALOG.iter().map(|entry| entry.courses.len()).sum()
}

/// Level encoded in a canonical course code: the character at index 2 when it
/// is a digit, otherwise 1.
pub fn level_from_code(code: &str) -> u8 {
    code.chars()
        .nth(2)
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
        .unwrap_or(1)
}

/// Check the static catalogs before any generation happens
pub fn validate_catalog() -> SynthResult<()> {
    validate_entries(COURSE_CATALOG)?;

    for (label, list) in [
        ("first names", FIRST_NAMES),
        ("last names", LAST_NAMES),
        ("programs", PROGRAMS),
        ("gender options", GENDER_OPTIONS),
        ("assessment types", ASSESSMENT_TYPES),
        ("academic years", ACADEMIC_YEARS),
    ] {
        if list.is_empty() {
            return Err(SynthError::FatalConfiguration(format!(
                "reference list of {} is empty",
                label
            )));
        }
    }

    Ok(())
}

fn validate_entries(catalog: &[ProgramCourses]) -> SynthResult<()> {
    for entry in catalog {
        if !PROGRAMS.contains(&entry.program) {
            return Err(SynthError::FatalConfiguration(format!(
                "catalog program '{}' is not a known program",
                entry.program
            )));
        }

        for course in entry.courses {
            if course.code.chars().count() < 3 {
                return Err(SynthError::FatalConfiguration(format!(
                    "course code '{}' in '{}' is shorter than 3 characters",
                    course.code, entry.program
                )));
            }
            if course.credits == 0 {
                return Err(SynthError::FatalConfiguration(format!(
                    "course '{}' has no credit hours",
                    course.code
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        assert!(validate_catalog().is_ok());
        assert_eq!(catalog_size(), 25);
    }

    #[test]
    fn test_every_program_has_courses() {
        for program in PROGRAMS {
            let courses = courses_for(program).unwrap();
            assert!(!courses.is_empty(), "{} has no courses", program);
        }
        assert!(courses_for("Nursing").is_none());
    }

    #[test]
    fn test_level_from_code() {
        assert_eq!(level_from_code("ICT101"), 1);
        assert_eq!(level_from_code("ICT301"), 1);
        assert_eq!(level_from_code("CE201"), 2);
        assert_eq!(level_from_code("EE101"), 1);
    }

    #[test]
    fn test_short_code_is_fatal() {
        static BROKEN: &[ProgramCourses] = &[ProgramCourses {
            program: "Architecture",
            courses: &[CatalogCourse::new("AR", "Drawing", 3)],
        }];

        let err = validate_entries(BROKEN).unwrap_err();
        assert!(matches!(err, SynthError::FatalConfiguration(_)));
    }

    #[test]
    fn test_unknown_program_is_fatal() {
        static BROKEN: &[ProgramCourses] = &[ProgramCourses {
            program: "Nursing",
            courses: &[CatalogCourse::new("NU101", "Anatomy", 3)],
        }];

        assert!(validate_entries(BROKEN).is_err());
    }
}
