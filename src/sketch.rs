use std::collections::HashSet;
use std::f64::consts::E;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SketchError;
use crate::hash::{hash_key, RowHash};

/// Direction of a threshold query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    /// Keep keys whose estimate is strictly greater than the cutoff.
    Above,
    /// Keep keys whose estimate is strictly less than the cutoff.
    Below,
}

/// Count-min sketch over observed keys with batch threshold queries.
///
/// The sketch owns a `depth x width` counter matrix (stored as one contiguous
/// buffer), one [`RowHash`] per row, the set of every distinct key ever
/// inserted, and a running total of insertions. A key's estimated frequency
/// is the minimum of its row counters, which is always at least the true
/// count: every insertion of the key bumps all of its counters, and
/// collisions can only add on top.
///
/// Sizing comes from the standard count-min accuracy theorem: with
/// `width = ceil(e / epsilon)` and `depth = ceil(ln(1 / gamma))`, a key's
/// estimate exceeds its true count by more than `epsilon * total()` with
/// probability at most `gamma`.
///
/// The observed-key set grows with the number of distinct keys and is never
/// pruned; threshold queries need it to enumerate candidates. The counter
/// matrix is bounded by the accuracy parameters, the key set is not — for
/// truly unbounded key spaces, budget for it.
///
/// All methods take `&self` or `&mut self`; wrap the sketch in external
/// synchronization if it must be shared across threads.
#[derive(Clone, Debug)]
pub struct HeavyHittersSketch {
    width: usize,
    rows: Vec<RowHash>,
    counters: Vec<u64>,
    keys: HashSet<String>,
    running_total: u64,
}

impl HeavyHittersSketch {
    /// Creates a sketch sized from an error bound and a failure probability,
    /// with hash coefficients drawn from a fresh random seed.
    ///
    /// `epsilon` bounds the relative estimation error and `gamma` bounds the
    /// probability of exceeding it; both must lie in `(0, 1]`.
    pub fn new(epsilon: f64, gamma: f64) -> Result<Self, SketchError> {
        Self::with_seed(epsilon, gamma, rand::random())
    }

    /// Creates a sketch sized from `(epsilon, gamma)` with hash coefficients
    /// derived deterministically from `seed`.
    ///
    /// Two sketches built with the same parameters and seed produce identical
    /// estimates for every insertion sequence.
    pub fn with_seed(epsilon: f64, gamma: f64, seed: u64) -> Result<Self, SketchError> {
        if !(epsilon > 0.0 && epsilon <= 1.0) {
            return Err(SketchError::invalid("epsilon", epsilon));
        }
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(SketchError::invalid("gamma", gamma));
        }
        let depth = ((1.0 / gamma).ln().ceil() as usize).max(1);
        Ok(Self::assemble(width_for(epsilon), depth, seed))
    }

    /// Creates a sketch sized from an error bound and an expected number of
    /// insertions `n`, with a fresh random seed.
    ///
    /// Uses `depth = ceil(e * ln(n))`, trading more rows for confidence when
    /// the stream length is known up front instead of a failure probability.
    pub fn with_expected_inserts(epsilon: f64, n: u64) -> Result<Self, SketchError> {
        Self::with_expected_inserts_seeded(epsilon, n, rand::random())
    }

    /// Creates a sketch sized from `(epsilon, n)` with coefficients derived
    /// deterministically from `seed`.
    pub fn with_expected_inserts_seeded(
        epsilon: f64,
        n: u64,
        seed: u64,
    ) -> Result<Self, SketchError> {
        if !(epsilon > 0.0 && epsilon <= 1.0) {
            return Err(SketchError::invalid("epsilon", epsilon));
        }
        if n == 0 {
            return Err(SketchError::invalid("n", 0.0));
        }
        let depth = ((E * (n as f64).ln()).ceil() as usize).max(1);
        Ok(Self::assemble(width_for(epsilon), depth, seed))
    }

    /// Creates a sketch from explicit row coefficients.
    ///
    /// The depth is `rows.len()`. This pins the column mapping exactly, which
    /// is the reproducible-setup escape hatch: tests can force collisions or
    /// known column layouts by choosing the coefficients.
    pub fn from_rows(width: usize, rows: Vec<RowHash>) -> Result<Self, SketchError> {
        if width == 0 {
            return Err(SketchError::invalid("width", 0.0));
        }
        if rows.is_empty() {
            return Err(SketchError::invalid("rows", 0.0));
        }
        let counters = vec![0u64; rows.len() * width];
        Ok(Self {
            width,
            rows,
            counters,
            keys: HashSet::new(),
            running_total: 0,
        })
    }

    fn assemble(width: usize, depth: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = (0..depth).map(|_| RowHash::random(&mut rng)).collect();
        Self {
            width,
            rows,
            counters: vec![0u64; depth * width],
            keys: HashSet::new(),
            running_total: 0,
        }
    }

    /// Records one observation of `key`.
    ///
    /// Increments one counter per row, remembers the key in the observed set,
    /// and bumps the running total. Never fails; duplicate keys simply keep
    /// incrementing their counters.
    pub fn add(&mut self, key: &str) {
        let hash = hash_key(key);
        for (row, row_hash) in self.rows.iter().enumerate() {
            let index = row * self.width + row_hash.column(hash, self.width);
            self.counters[index] += 1;
        }
        if !self.keys.contains(key) {
            self.keys.insert(key.to_owned());
        }
        self.running_total += 1;
    }

    /// Estimated number of times `key` has been added.
    ///
    /// The minimum over the key's row counters. Never below the true count;
    /// may exceed it when other keys collide into the same columns.
    pub fn estimate(&self, key: &str) -> u64 {
        let hash = hash_key(key);
        self.rows
            .iter()
            .enumerate()
            .map(|(row, row_hash)| self.counters[row * self.width + row_hash.column(hash, self.width)])
            .min()
            .unwrap_or(0)
    }

    /// Observed keys whose estimate is strictly above (or below) `value`.
    ///
    /// Scans the whole observed-key set, so the cost is proportional to the
    /// number of distinct keys times the sketch depth. Keys whose estimate
    /// equals `value` exactly appear in neither direction's result.
    pub fn keys_by_value(&self, value: u64, threshold: Threshold) -> HashSet<String> {
        self.keys
            .iter()
            .filter(|key| {
                let estimate = self.estimate(key.as_str());
                match threshold {
                    Threshold::Above => estimate > value,
                    Threshold::Below => estimate < value,
                }
            })
            .cloned()
            .collect()
    }

    /// Observed keys whose estimate is strictly above (or below) a fraction
    /// of the running total.
    ///
    /// The cutoff is `ceil(fraction * total())`; the scan is then identical
    /// to [`keys_by_value`](Self::keys_by_value) at that cutoff.
    pub fn keys_by_percentage(&self, fraction: f64, threshold: Threshold) -> HashSet<String> {
        let cutoff = (fraction * self.running_total as f64).ceil() as u64;
        self.keys_by_value(cutoff, threshold)
    }

    /// Number of insertion calls so far, duplicates included.
    pub fn total(&self) -> u64 {
        self.running_total
    }

    /// Number of rows in the counter matrix.
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of distinct keys observed so far.
    pub fn observed_keys(&self) -> usize {
        self.keys.len()
    }

    /// The relative error implied by the width, `e / width`.
    pub fn relative_error(&self) -> f64 {
        E / self.width as f64
    }
}

fn width_for(epsilon: f64) -> usize {
    (E / epsilon).ceil() as usize
}
