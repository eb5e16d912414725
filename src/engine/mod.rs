//! Schedule-combination engine.
//!
//! Given a term's course offerings and a student's constraints, the engine
//! enumerates, prunes, scores, and ranks feasible "one offering per
//! course" combinations into a bounded set of best weekly schedules.
//!
//! # Pipeline
//!
//! 1. Validate the input snapshot (fatal errors only; see `validation`)
//! 2. Shuffle each course's offering list with the request seed
//! 3. Build the pairwise conflict matrix once
//! 4. Enumerate combinations — exhaustively when the product fits the
//!    budget, otherwise from spread-out starting points — pruning via the
//!    matrix and retaining the best in bounded per-worker pools
//! 5. Merge worker pools, probe the best schedule's 1-swap neighborhood
//! 6. Re-rank by the lexicographic comparator and drain quality tiers
//!
//! The engine is a pure batch computation: no I/O, no shared mutable
//! state beyond the read-only snapshot and the conflict matrix, and
//! deterministic output for a fixed `(seed, workers)` pair — safe for
//! callers to memoize by input hash.

mod builder;
mod conflicts;
mod enumerate;
mod rank;
mod refine;
mod retain;

use std::collections::{BTreeSet, HashSet};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{CourseOfferings, Schedule, Weekday};
use crate::validation::{self, ValidationError};

pub use conflicts::ConflictMatrix;
pub use rank::{compare, tier_of, QualityTier};

use enumerate::{Searcher, MIN_EXPLORATION_FRACTION, SAMPLED_START_POINTS};
use retain::{TopK, RETENTION_FACTOR};

/// Default combination budget per invocation.
pub const DEFAULT_BUDGET: u64 = 2_000_000;
/// Default number of schedules returned.
pub const DEFAULT_TARGET_COUNT: usize = 50;

/// A fatal generation error. Infeasible combinations and budget
/// exhaustion are routine outcomes, not errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input snapshot failed validation; no enumeration was started.
    #[error("invalid engine input ({} issue(s))", .0.len())]
    InvalidInput(Vec<ValidationError>),
}

/// Input for one engine invocation.
///
/// `core` holds the core courses already filtered to exclude the
/// student's excluded-core selections; `electives` holds the at-most-two
/// courses the student picked.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Core course offerings.
    pub core: Vec<CourseOfferings>,
    /// Selected elective offerings (at most two courses).
    pub electives: Vec<CourseOfferings>,
    /// Days the student wants free.
    pub excluded_days: BTreeSet<Weekday>,
    /// Maximum combinations to examine.
    pub budget: u64,
    /// Desired output size.
    pub target_count: usize,
    /// Seed for offering shuffling and random starting points.
    pub seed: u64,
    /// Worker threads for the enumeration fork-join.
    pub workers: usize,
    /// Optional wall-clock cap; best-so-far results are returned on expiry.
    pub time_limit: Option<Duration>,
}

impl GenerateRequest {
    /// Creates a request with default budget, target count, and a single
    /// worker.
    pub fn new(core: Vec<CourseOfferings>, electives: Vec<CourseOfferings>) -> Self {
        Self {
            core,
            electives,
            excluded_days: BTreeSet::new(),
            budget: DEFAULT_BUDGET,
            target_count: DEFAULT_TARGET_COUNT,
            seed: 0,
            workers: 1,
            time_limit: None,
        }
    }

    /// Adds an excluded day.
    pub fn with_excluded_day(mut self, day: Weekday) -> Self {
        self.excluded_days.insert(day);
        self
    }

    /// Sets the combination budget.
    pub fn with_budget(mut self, budget: u64) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the output size.
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    /// Sets the randomization seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the worker thread count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets a wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Ranked output of one engine invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Best schedules, ranked and tier-ordered, at most `target_count`.
    pub schedules: Vec<Schedule>,
    /// Combinations examined across all workers (pruned ones included).
    pub combinations_examined: u64,
    /// Whether the full cartesian product was within budget.
    pub exhaustive: bool,
    /// Set when `schedules` is empty, for user-facing messaging.
    pub reason: Option<String>,
}

/// Work assigned to one enumeration worker.
enum WorkerPlan {
    /// A contiguous, disjoint rank range of an exhaustive walk.
    Range { start: u128, len: u128 },
    /// Sampled starting points, each walked for `steps` combinations.
    Sampled {
        starts: Vec<u128>,
        steps: u64,
        min_explore: u64,
    },
}

/// The schedule-combination engine.
#[derive(Debug, Clone, Default)]
pub struct Engine;

impl Engine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self
    }

    /// Generates ranked schedules for the request.
    ///
    /// # Errors
    /// [`GenerateError::InvalidInput`] when the snapshot fails validation;
    /// enumeration is never started in that case.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateResult, GenerateError> {
        validation::validate_input(&request.core, &request.electives)
            .map_err(GenerateError::InvalidInput)?;

        let mut rng = SmallRng::seed_from_u64(request.seed);
        let mut courses: Vec<CourseOfferings> = request
            .core
            .iter()
            .chain(&request.electives)
            .cloned()
            .collect();
        // Shuffle once per invocation to avoid systematic bias toward the
        // first-listed offering of each course.
        for entry in &mut courses {
            entry.offerings.shuffle(&mut rng);
        }

        let product = enumerate::space_size(&courses);
        let budget = request.budget.max(1);
        let exhaustive = product <= budget as u128;
        let workers = request.workers.max(1);
        let pool_capacity = request.target_count.max(1) * RETENTION_FACTOR;
        let deadline = request.time_limit.map(|limit| Instant::now() + limit);
        let excluded_days = &request.excluded_days;

        let matrix = ConflictMatrix::build(&courses);
        info!(
            "generating schedules: {} courses, {} offerings, {} combinations ({}), {} worker(s)",
            courses.len(),
            matrix.offering_count(),
            product,
            if exhaustive { "exhaustive" } else { "sampled" },
            workers,
        );

        let plans = if exhaustive {
            plan_exhaustive(product, workers)
        } else {
            plan_sampled(product, budget, workers, &mut rng)
        };

        let courses_ref = &courses;
        let matrix_ref = &matrix;
        let run_worker = move |plan: WorkerPlan| -> (Vec<Schedule>, u64, u64) {
            let mut searcher =
                Searcher::new(courses_ref, matrix_ref, excluded_days, pool_capacity, deadline);
            match plan {
                WorkerPlan::Range { start, len } => {
                    searcher.run_range(start, len);
                }
                WorkerPlan::Sampled {
                    starts,
                    steps,
                    min_explore,
                } => {
                    for start in starts {
                        if !searcher.run_sampled(start, steps, min_explore) {
                            break;
                        }
                    }
                }
            }
            (
                searcher.retainer.into_sorted_vec(),
                searcher.examined,
                searcher.pruned,
            )
        };

        let outcomes: Vec<(Vec<Schedule>, u64, u64)> = if workers == 1 {
            plans.into_iter().map(&run_worker).collect()
        } else {
            thread::scope(|scope| {
                let handles: Vec<_> = plans
                    .into_iter()
                    .map(|plan| scope.spawn(|| run_worker(plan)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().expect("enumeration worker panicked"))
                    .collect()
            })
        };

        // Merge in worker order; seen-sets are worker-local, so identical
        // combinations can arrive from overlapping sampled regions.
        let mut merged = TopK::new(pool_capacity);
        let mut seen_keys: HashSet<Vec<String>> = HashSet::new();
        let mut combinations_examined = 0u64;
        let mut pruned = 0u64;
        for (schedules, examined, worker_pruned) in outcomes {
            combinations_examined += examined;
            pruned += worker_pruned;
            for schedule in schedules {
                let key: Vec<String> = schedule
                    .selection_key()
                    .iter()
                    .map(|k| (*k).to_string())
                    .collect();
                if seen_keys.insert(key) {
                    merged.insert(schedule);
                }
            }
        }
        debug!(
            "enumeration done: {} examined, {} pruned, {} retained",
            combinations_examined,
            pruned,
            merged.len(),
        );

        let probed =
            refine::refine_best(&courses, &matrix, excluded_days, &mut seen_keys, &mut merged);
        debug!("local search probed {} neighbor(s)", probed);

        let schedules = rank::select(merged.into_sorted_vec(), request.target_count);
        let reason = if schedules.is_empty() {
            Some(if excluded_days.is_empty() {
                "no conflict-free schedules exist for the given offerings".to_string()
            } else {
                "no conflict-free schedules exist; consider relaxing the excluded days"
                    .to_string()
            })
        } else {
            None
        };
        info!("returning {} schedule(s)", schedules.len());

        Ok(GenerateResult {
            schedules,
            combinations_examined,
            exhaustive,
            reason,
        })
    }
}

/// Splits `[0, product)` into contiguous per-worker rank ranges.
fn plan_exhaustive(product: u128, workers: usize) -> Vec<WorkerPlan> {
    let workers = workers as u128;
    let per = product / workers;
    let rem = product % workers;
    (0..workers)
        .map(|w| {
            let len = per + u128::from(w < rem);
            let start = w * per + w.min(rem);
            WorkerPlan::Range { start, len }
        })
        .filter(|plan| !matches!(plan, WorkerPlan::Range { len: 0, .. }))
        .collect()
}

/// Plans sampled starting points and assigns them round-robin to workers.
fn plan_sampled<R: rand::Rng>(
    product: u128,
    budget: u64,
    workers: usize,
    rng: &mut R,
) -> Vec<WorkerPlan> {
    // The budget is a hard cap: never hand out more starting points than
    // budgeted combinations, so steps * start_count stays within it.
    let start_count = SAMPLED_START_POINTS
        .max(workers)
        .min(budget as usize)
        .max(1);
    let starts = enumerate::plan_starts(product, start_count, rng);
    let steps = (budget / start_count as u64).max(1);
    let min_explore =
        ((budget / workers as u64) as f64 * MIN_EXPLORATION_FRACTION).ceil() as u64;

    let mut assigned: Vec<Vec<u128>> = vec![Vec::new(); workers];
    for (i, start) in starts.into_iter().enumerate() {
        assigned[i % workers].push(start);
    }
    assigned
        .into_iter()
        .filter(|starts| !starts.is_empty())
        .map(|starts| WorkerPlan::Sampled {
            starts,
            steps,
            min_explore,
        })
        .collect()
}
