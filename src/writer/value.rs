use serde::Serialize;

use crate::generator::{Assessment, Course, Student};
use crate::schema::{TableSchema, ASSESSMENTS, COURSES, STUDENTS};

/// A single output field, absent values included
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(s: &String) -> Self {
        SqlValue::Text(s.clone())
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        SqlValue::Integer(v.into())
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        SqlValue::Integer(v.into())
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// A generated record that knows its output table and column values
pub trait TableRow: Serialize {
    fn schema() -> &'static TableSchema;

    /// Field values in the schema's column order
    fn values(&self) -> Vec<SqlValue>;
}

impl TableRow for Student {
    fn schema() -> &'static TableSchema {
        &STUDENTS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.student_id).into(),
            (&self.first_name).into(),
            (&self.last_name).into(),
            self.gender.into(),
            self.dob.map(|d| d.to_string()).as_ref().into(),
            self.phone.as_ref().into(),
            (&self.email).into(),
            (&self.program).into(),
            self.level.into(),
            self.intake_year.into(),
        ]
    }
}

impl TableRow for Course {
    fn schema() -> &'static TableSchema {
        &COURSES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.course_code).into(),
            (&self.course_title).into(),
            self.credits.into(),
            self.program.into(),
            self.level.into(),
            self.semester.into(),
        ]
    }
}

impl TableRow for Assessment {
    fn schema() -> &'static TableSchema {
        &ASSESSMENTS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.student_id).into(),
            (&self.course_code).into(),
            self.assessment_type.into(),
            self.mark.into(),
            SqlValue::Text(self.assessment_date.to_string()),
            self.academic_year.into(),
            self.semester.into(),
            self.attendance_rate.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RecordDate;
    use chrono::NaiveDate;

    #[test]
    fn test_optional_values_become_null() {
        assert_eq!(SqlValue::from(None::<f64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(4u8)), SqlValue::Integer(4));
        assert_eq!(SqlValue::from(Some("Male")), SqlValue::Text("Male".to_string()));
    }

    #[test]
    fn test_values_follow_column_order() {
        let row = Assessment {
            student_id: "RPH0001".to_string(),
            course_code: "ict101".to_string(),
            assessment_type: "Quiz",
            mark: None,
            assessment_date: RecordDate::day_first(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()),
            academic_year: "2024/2025",
            semester: 2,
            attendance_rate: Some(88.5),
        };

        let values = row.values();
        assert_eq!(values.len(), Assessment::schema().columns.len());
        assert_eq!(values[1], SqlValue::Text("ict101".to_string()));
        assert_eq!(values[3], SqlValue::Null);
        assert_eq!(values[4], SqlValue::Text("03/02/2025".to_string()));
        assert_eq!(values[7], SqlValue::Real(88.5));
    }
}
