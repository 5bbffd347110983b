//! Table-level defect passes: field absence plans and row duplication

use rand::seq::index;
use rand::Rng;
use std::collections::BTreeMap;

/// Number of rows a fraction of `len` selects (floored)
pub fn fraction_count(len: usize, fraction: f64) -> usize {
    ((len as f64) * fraction) as usize
}

/// Assignment of named defects to row indices.
///
/// A plan is drawn once from its own random stream, then applied as a single
/// map over the table, so whether a row is defective depends only on its
/// index, the seed and the policy.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectPlan<D> {
    assignments: BTreeMap<usize, D>,
}

impl<D: Copy + PartialEq> DefectPlan<D> {
    pub fn none() -> Self {
        Self {
            assignments: BTreeMap::new(),
        }
    }

    /// Sample `floor(len * fraction)` distinct rows and split them, in sample
    /// order, into `defects.len()` consecutive groups. Group `g` spans sample
    /// positions `g*k/n .. (g+1)*k/n`, so the last group absorbs the remainder.
    pub fn partitioned<R: Rng + ?Sized>(
        len: usize,
        fraction: f64,
        defects: &[D],
        rng: &mut R,
    ) -> Self {
        if defects.is_empty() {
            return Self::none();
        }

        let k = fraction_count(len, fraction).min(len);
        let picked = index::sample(rng, len, k).into_vec();
        let groups = defects.len();

        let mut assignments = BTreeMap::new();
        for (g, defect) in defects.iter().enumerate() {
            let start = g * k / groups;
            let end = (g + 1) * k / groups;
            for &row in &picked[start..end] {
                assignments.insert(row, *defect);
            }
        }

        Self { assignments }
    }

    /// Single-defect plan over `floor(len * fraction)` sampled rows
    pub fn uniform<R: Rng + ?Sized>(len: usize, fraction: f64, defect: D, rng: &mut R) -> Self {
        Self::partitioned(len, fraction, &[defect], rng)
    }

    pub fn defect_for(&self, row: usize) -> Option<D> {
        self.assignments.get(&row).copied()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn count_of(&self, defect: D) -> usize {
        self.assignments.values().filter(|d| **d == defect).count()
    }

    /// Run every row through `inject` together with its assigned defect
    pub fn apply<T>(&self, rows: Vec<T>, inject: impl Fn(&mut T, D)) -> Vec<T> {
        rows.into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                if let Some(defect) = self.defect_for(i) {
                    inject(&mut row, defect);
                }
                row
            })
            .collect()
    }
}

/// Append verbatim copies of randomly chosen rows, simulating double entry.
/// Draws the copy count from `range` (inclusive), samples that many distinct
/// rows and returns how many were appended.
pub fn append_duplicates<T: Clone, R: Rng + ?Sized>(
    rows: &mut Vec<T>,
    range: (usize, usize),
    rng: &mut R,
) -> usize {
    let wanted = rng.gen_range(range.0..=range.1);
    let count = wanted.min(rows.len());

    let copies: Vec<T> = index::sample(rng, rows.len(), count)
        .into_iter()
        .map(|i| rows[i].clone())
        .collect();
    rows.extend(copies);

    count
}
