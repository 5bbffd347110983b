use thiserror::Error;

/// Errors raised while synthesizing site datasets
#[derive(Debug, Error, PartialEq)]
pub enum SynthError {
    /// No course in the table carries the requested program tag.
    /// Assessment generation recovers from this by sampling the whole table.
    #[error("no courses found for program '{program}'")]
    CatalogGap { program: String },

    /// Reference catalogs or the defect policy are internally inconsistent
    #[error("invalid generator configuration: {0}")]
    FatalConfiguration(String),
}

pub type SynthResult<T> = Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let gap = SynthError::CatalogGap {
            program: "Nursing".to_string(),
        };
        assert_eq!(gap.to_string(), "no courses found for program 'Nursing'");

        let fatal = SynthError::FatalConfiguration("course code 'X1' too short".to_string());
        assert!(fatal.to_string().contains("X1"));
    }
}
