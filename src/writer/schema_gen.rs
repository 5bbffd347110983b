use crate::reference::Site;
use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a site's copy of a table.
///
/// No primary key: duplicated rows share identifiers on purpose.
pub fn generate_create_table(schema: &TableSchema, site: Site) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.table_name(site));

    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|col| {
            let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
            format!("    {} {}{}", col.name, col.col_type.sql_type(), null_constraint)
        })
        .collect();

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for the join columns
pub fn generate_indexes(schema: &TableSchema, site: Site) -> Vec<String> {
    let table = schema.table_name(site);
    schema
        .join_columns
        .iter()
        .map(|column| {
            format!(
                "CREATE INDEX idx_{}_{} ON {}({})",
                table,
                column.to_lowercase(),
                table,
                column
            )
        })
        .collect()
}

/// Generate the INSERT statement with one placeholder per column
pub fn generate_insert(schema: &TableSchema, site: Site) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.table_name(site),
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ASSESSMENTS, STUDENTS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&STUDENTS, Site::Huye);
        assert!(sql.contains("CREATE TABLE huye_students"));
        assert!(sql.contains("Student_ID TEXT NOT NULL"));
        assert!(sql.contains("Gender TEXT,"));
        assert!(sql.contains("Intake_Year INTEGER NOT NULL"));
        assert!(!sql.contains("PRIMARY KEY"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&ASSESSMENTS, Site::Musanze);
        assert_eq!(indexes.len(), 2);
        assert!(indexes
            .iter()
            .any(|i| i.contains("idx_musanze_assessments_course_code")));
    }

    #[test]
    fn test_generate_insert() {
        let sql = generate_insert(&ASSESSMENTS, Site::Kigali);
        assert!(sql.starts_with("INSERT INTO kigali_assessments (Student_ID, Course_Code,"));
        assert!(sql.ends_with("VALUES (?, ?, ?, ?, ?, ?, ?, ?)"));
    }
}
