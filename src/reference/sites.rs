use std::fmt;
use std::str::FromStr;

/// Campus a dataset is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Site {
    Huye,
    Kigali,
    Musanze,
}

/// All sites in generation order
pub const SITES: &[Site] = &[Site::Huye, Site::Kigali, Site::Musanze];

impl Site {
    pub fn name(&self) -> &'static str {
        match self {
            Site::Huye => "Huye",
            Site::Kigali => "Kigali",
            Site::Musanze => "Musanze",
        }
    }

    /// Position in [`SITES`]
    pub fn ordinal(&self) -> usize {
        match self {
            Site::Huye => 0,
            Site::Kigali => 1,
            Site::Musanze => 2,
        }
    }

    /// Offset added to student sequence numbers so identifiers stay
    /// distinguishable across sites
    pub fn id_offset(&self) -> usize {
        self.ordinal() * 1000
    }

    /// Student identifier prefix (`RPH`, `RPK`, `RPM`)
    pub fn id_prefix(&self) -> String {
        let initial = self.name().chars().next().unwrap_or('X');
        format!("RP{}", initial)
    }

    /// Build the identifier for the `seq`-th student (1-based)
    pub fn student_id(&self, seq: usize) -> String {
        format!("{}{:04}", self.id_prefix(), self.id_offset() + seq)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SITES
            .iter()
            .copied()
            .find(|site| site.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown site: {}", s))
    }
}
