//! Seeded random streams threaded through every generator.
//!
//! Each (site, pass) pair gets its own ChaCha8 stream derived from the run
//! seed, so the records a pass touches depend only on the seed, the site and
//! the pass, never on how much randomness other passes consumed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::reference::Site;

pub type SynthRng = ChaCha8Rng;

/// Named generation passes, one random stream each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Pass {
    StudentCount = 1,
    StudentBase,
    StudentMissing,
    StudentDuplicates,
    CourseBase,
    CourseCredits,
    AssessmentBase,
    AssessmentMarks,
    AssessmentDuplicates,
    AssessmentDates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedContext {
    seed: u64,
}

impl SeedContext {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fresh generator for one pass over one site's table
    pub fn stream(&self, site: Site, pass: Pass) -> SynthRng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(((site.ordinal() as u64) << 8) | pass as u64);
        rng
    }
}
