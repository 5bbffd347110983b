use crate::reference::Site;

/// Column data type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    /// Whether the generators may leave this field absent
    pub nullable: bool,
}

impl Column {
    /// Create an optional (nullable) column
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: true,
        }
    }

    /// Create a required (non-nullable) column
    pub const fn required(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: false,
        }
    }
}

/// Output table definition; column order is part of the output contract
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Table kind (`students`, `courses`, `assessments`)
    pub name: &'static str,
    pub columns: &'static [Column],
    /// Columns other tables join on (not enforced as foreign keys)
    pub join_columns: &'static [&'static str],
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Output file name for a site, e.g. `Huye_students.jsonl`
    pub fn file_name(&self, site: Site, extension: &str) -> String {
        format!("{}_{}.{}", site.name(), self.name, extension)
    }

    /// SQL table name for a site, e.g. `huye_students`
    pub fn table_name(&self, site: Site) -> String {
        format!("{}_{}", site.name().to_lowercase(), self.name)
    }
}
