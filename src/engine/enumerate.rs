//! Combination enumeration over the offering cartesian product.
//!
//! The current combination is a mixed-radix index vector (one digit per
//! course, radix = that course's offering count) advanced like an
//! odometer: increment the last digit, carry on overflow. Advancing is
//! exactly rank+1 in the mixed-radix number system, so every distinct
//! combination is visited once per full cycle.
//!
//! When the full product exceeds the combination budget, the walk instead
//! runs from multiple starting ranks — deterministic evenly spaced points
//! plus seeded random ones — each for a bounded number of steps, so
//! exploration spreads across the whole space instead of clustering near
//! rank zero. A seen-set of ranks deduplicates overlapping runs.
//!
//! # Reference
//! Knuth, TAOCP Vol. 4A, 7.2.1.1 "Generating all n-tuples"

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use rand::Rng;

use crate::models::{CourseOfferings, Weekday};

use super::builder;
use super::conflicts::ConflictMatrix;
use super::retain::TopK;

/// Fraction of the budget that must be explored before a full retainer
/// may end a sampled search early. Guards against settling for a nearby
/// local optimum when a better region exists elsewhere in the space.
pub(crate) const MIN_EXPLORATION_FRACTION: f64 = 0.2;

/// How many starting ranks a sampled search uses (half deterministic
/// spread, half random).
pub(crate) const SAMPLED_START_POINTS: usize = 16;

/// Steps between wall-clock deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Size of the full cartesian product, saturating.
pub(crate) fn space_size(courses: &[CourseOfferings]) -> u128 {
    courses
        .iter()
        .fold(1u128, |acc, c| acc.saturating_mul(c.offerings.len() as u128))
}

/// Starting ranks for a sampled search: evenly spaced deterministic
/// points first, then seeded random points. Overlap between runs is
/// handled by the searcher's seen-set.
pub(crate) fn plan_starts<R: Rng>(product: u128, count: usize, rng: &mut R) -> Vec<u128> {
    let deterministic = count / 2;
    let mut starts = Vec::with_capacity(count);
    for k in 0..deterministic {
        starts.push(product / deterministic as u128 * k as u128);
    }
    while starts.len() < count {
        starts.push(rng.random_range(0..product));
    }
    starts
}

/// Mixed-radix odometer over per-course offering indices.
#[derive(Debug)]
pub(crate) struct Odometer {
    digits: Vec<usize>,
    radices: Vec<usize>,
    rank: u128,
    product: u128,
}

impl Odometer {
    /// Positions the odometer at the given rank (0-based, row-major with
    /// the last course as the least significant digit).
    pub fn from_rank(radices: &[usize], rank: u128, product: u128) -> Self {
        let mut digits = vec![0; radices.len()];
        let mut rest = rank;
        for i in (0..radices.len()).rev() {
            digits[i] = (rest % radices[i] as u128) as usize;
            rest /= radices[i] as u128;
        }
        Self {
            digits,
            radices: radices.to_vec(),
            rank,
            product,
        }
    }

    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    pub fn rank(&self) -> u128 {
        self.rank
    }

    /// Advances to the next combination, wrapping past the last rank
    /// back to rank zero.
    pub fn advance(&mut self) {
        self.rank = (self.rank + 1) % self.product;
        for i in (0..self.digits.len()).rev() {
            self.digits[i] += 1;
            if self.digits[i] < self.radices[i] {
                return;
            }
            self.digits[i] = 0;
        }
    }
}

/// One worker's search state: walks regions of the combination space,
/// prunes via the conflict matrix, builds surviving combinations, and
/// retains the best in a local bounded pool.
pub(crate) struct Searcher<'a> {
    courses: &'a [CourseOfferings],
    matrix: &'a ConflictMatrix,
    excluded_days: &'a BTreeSet<Weekday>,
    radices: Vec<usize>,
    product: u128,
    seen: HashSet<u128>,
    deadline: Option<Instant>,
    /// Best schedules retained by this worker.
    pub retainer: TopK,
    /// Combinations examined so far (pruned ones included).
    pub examined: u64,
    /// Combinations discarded by conflict-matrix pruning.
    pub pruned: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(
        courses: &'a [CourseOfferings],
        matrix: &'a ConflictMatrix,
        excluded_days: &'a BTreeSet<Weekday>,
        pool_capacity: usize,
        deadline: Option<Instant>,
    ) -> Self {
        let radices: Vec<usize> = courses.iter().map(|c| c.offerings.len()).collect();
        let product = space_size(courses);
        Self {
            courses,
            matrix,
            excluded_days,
            radices,
            product,
            seen: HashSet::new(),
            deadline,
            retainer: TopK::new(pool_capacity),
            examined: 0,
            pruned: 0,
        }
    }

    fn deadline_hit(&self) -> bool {
        self.examined % DEADLINE_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn examine(&mut self, digits: &[usize]) {
        self.examined += 1;
        if self.matrix.selection_conflicts(digits) {
            self.pruned += 1;
            return;
        }
        if let Some(schedule) = builder::build_schedule(self.courses, digits, self.excluded_days)
        {
            self.retainer.insert(schedule);
        }
    }

    /// Walks `len` consecutive combinations starting at `start`. Used for
    /// exhaustive searches over disjoint rank ranges; no deduplication or
    /// quality-based early stop applies.
    ///
    /// Returns `false` when the wall-clock deadline ended the walk.
    pub fn run_range(&mut self, start: u128, len: u128) -> bool {
        let mut odo = Odometer::from_rank(&self.radices, start, self.product);
        let mut remaining = len;
        while remaining > 0 {
            if self.deadline_hit() {
                return false;
            }
            self.examine(odo.digits());
            odo.advance();
            remaining -= 1;
        }
        true
    }

    /// Walks up to `steps` combinations from `start`, skipping ranks this
    /// searcher has already processed. Stops early once the retainer is
    /// full, but only after `min_explore` combinations have been examined.
    ///
    /// Returns `false` when the search should not continue from further
    /// starting points (deadline hit or early stop taken).
    pub fn run_sampled(&mut self, start: u128, steps: u64, min_explore: u64) -> bool {
        let mut odo = Odometer::from_rank(&self.radices, start, self.product);
        for _ in 0..steps {
            if self.deadline_hit() {
                return false;
            }
            if self.seen.insert(odo.rank()) {
                self.examine(odo.digits());
            } else {
                self.examined += 1;
            }
            if self.examined >= min_explore && self.retainer.is_full() {
                return false;
            }
            odo.advance();
        }
        true
    }
}
