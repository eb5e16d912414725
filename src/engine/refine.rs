//! 1-swap local search around the best retained schedule.
//!
//! After broad enumeration, the single best schedule seeds a neighborhood
//! probe: for each course, every alternative offering is substituted while
//! all other selections stay fixed, and any valid neighbor re-enters the
//! retainer. Linear in the total offering count, so it is cheap relative
//! to the enumeration pass, and it catches nearby improvements the
//! sampling may have missed.
//!
//! # Reference
//! Aarts & Lenstra (1997), "Local Search in Combinatorial Optimization"

use std::collections::{BTreeSet, HashSet};

use crate::models::{CourseOfferings, Schedule, Weekday};

use super::builder;
use super::conflicts::ConflictMatrix;
use super::retain::TopK;

/// Recovers the offering index vector behind a schedule.
///
/// Schedules store offering IDs; the courses slice is the same (already
/// shuffled) list the schedule was built from, so every ID resolves.
fn selection_of(schedule: &Schedule, courses: &[CourseOfferings]) -> Option<Vec<usize>> {
    schedule
        .courses
        .iter()
        .zip(courses)
        .map(|(sc, entry)| {
            entry
                .offerings
                .iter()
                .position(|o| o.id == sc.offering.id)
        })
        .collect()
}

/// Probes the 1-swap neighborhood of the retainer's best schedule,
/// feeding valid neighbors back into the retainer.
///
/// `seen` holds the selection keys of combinations already retained;
/// neighbors found there are skipped so the final pool never carries the
/// same combination twice. Newly retained neighbors are recorded in it.
pub(crate) fn refine_best(
    courses: &[CourseOfferings],
    matrix: &ConflictMatrix,
    excluded_days: &BTreeSet<Weekday>,
    seen: &mut HashSet<Vec<String>>,
    retainer: &mut TopK,
) -> usize {
    let Some(best) = retainer.best().cloned() else {
        return 0;
    };
    let Some(selection) = selection_of(&best, courses) else {
        return 0;
    };

    let mut probed = 0;
    let mut candidate = selection.clone();
    for (ci, entry) in courses.iter().enumerate() {
        for oi in 0..entry.offerings.len() {
            if oi == selection[ci] {
                continue;
            }
            candidate[ci] = oi;
            probed += 1;
            if !matrix.selection_conflicts(&candidate) {
                let key: Vec<String> = candidate
                    .iter()
                    .zip(courses)
                    .map(|(&i, entry)| entry.offerings[i].id.clone())
                    .collect();
                if !seen.contains(&key) {
                    if let Some(schedule) =
                        builder::build_schedule(courses, &candidate, excluded_days)
                    {
                        seen.insert(key);
                        retainer.insert(schedule);
                    }
                }
            }
        }
        candidate[ci] = selection[ci];
    }
    probed
}
