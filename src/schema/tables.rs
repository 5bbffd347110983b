//! Output table definitions for the generated datasets

use super::types::*;

pub static STUDENTS: TableSchema = TableSchema {
    name: "students",
    columns: &[
        Column::required("Student_ID", ColumnType::Text),
        Column::required("First_Name", ColumnType::Text),
        Column::required("Last_Name", ColumnType::Text),
        Column::new("Gender", ColumnType::Text),
        Column::new("DOB", ColumnType::Text),
        Column::new("Phone", ColumnType::Text),
        Column::required("Email", ColumnType::Text),
        Column::required("Program", ColumnType::Text),
        Column::required("Level", ColumnType::Integer),
        Column::required("Intake_Year", ColumnType::Integer),
    ],
    join_columns: &["Student_ID"],
};

pub static COURSES: TableSchema = TableSchema {
    name: "courses",
    columns: &[
        Column::required("Course_Code", ColumnType::Text),
        Column::required("Course_Title", ColumnType::Text),
        Column::new("Credits", ColumnType::Integer),
        Column::required("Program", ColumnType::Text),
        Column::required("Level", ColumnType::Integer),
        Column::required("Semester", ColumnType::Integer),
    ],
    join_columns: &["Course_Code", "Program"],
};

pub static ASSESSMENTS: TableSchema = TableSchema {
    name: "assessments",
    columns: &[
        Column::required("Student_ID", ColumnType::Text),
        Column::required("Course_Code", ColumnType::Text),
        Column::required("Assessment_Type", ColumnType::Text),
        Column::new("Mark", ColumnType::Real),
        Column::required("Assessment_Date", ColumnType::Text),
        Column::required("Academic_Year", ColumnType::Text),
        Column::required("Semester", ColumnType::Integer),
        Column::new("Attendance_Rate", ColumnType::Real),
    ],
    join_columns: &["Student_ID", "Course_Code"],
};

/// All output tables in generation-independent listing order
pub static ALL_TABLES: &[&TableSchema] = &[&STUDENTS, &COURSES, &ASSESSMENTS];

/// Get a table schema by kind
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Site;

    #[test]
    fn test_column_counts() {
        assert_eq!(STUDENTS.columns.len(), 10);
        assert_eq!(COURSES.columns.len(), 6);
        assert_eq!(ASSESSMENTS.columns.len(), 8);
    }

    #[test]
    fn test_join_columns_exist() {
        for table in ALL_TABLES {
            let names = table.column_names();
            for join in table.join_columns {
                assert!(names.contains(join), "{} missing {}", table.name, join);
            }
        }
    }

    #[test]
    fn test_names_per_site() {
        assert_eq!(STUDENTS.file_name(Site::Huye, "jsonl"), "Huye_students.jsonl");
        assert_eq!(ASSESSMENTS.table_name(Site::Kigali), "kigali_assessments");
        assert!(get_table("courses").is_some());
        assert!(get_table("grades").is_none());
        assert_eq!(table_names(), vec!["students", "courses", "assessments"]);
    }
}
