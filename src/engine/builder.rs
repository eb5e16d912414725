//! Combination validation, metric derivation, and scoring.
//!
//! Turns one concrete combination (one offering per course) into a
//! [`Schedule`], or `None` when the combination is infeasible. Infeasible
//! is a routine outcome, not an error: the enumerator simply moves on.
//!
//! # Validation order
//!
//! 1. Component completeness per the course's declared component types:
//!    a lecture is required whenever declared; when both section and lab
//!    are declared, at least one of the two must carry a session; when
//!    exactly one is declared, that one is required.
//! 2. Cross-course `(day, slot)` collision, checked incrementally against
//!    a running occupancy mask as courses are processed.
//!
//! # Scoring
//!
//! The composite score is a retention heuristic only — it decides which
//! candidates survive the bounded pool during enumeration. The final
//! output ordering is the ranker's lexicographic comparator.

use std::collections::BTreeSet;

use crate::models::{
    ComponentType, Course, CourseOfferings, Offering, PlacedSession, Schedule, ScheduledCourse,
    Weekday,
};

use super::conflicts::occupancy_bit;

/// Score baseline for any feasible schedule.
const BASE_SCORE: f64 = 1000.0;
/// Bonus when no excluded day is used.
const NO_EXCLUDED_DAY_BONUS: f64 = 500.0;
/// Penalty per excluded day used.
const EXCLUDED_DAY_PENALTY: f64 = 300.0;
/// Penalty when any lecture falls on an excluded day.
const EXCLUDED_LECTURE_PENALTY: f64 = 400.0;
/// Penalty factor per excluded day used, scaled by (slots - 1)^2 so that
/// one slot costs nothing and four slots cost the most.
const EXCLUDED_SLOT_PENALTY: f64 = 40.0;
/// Bonus divided by the number of days used (fewer days is better).
const FEW_DAYS_BONUS: f64 = 240.0;
/// Penalty per idle gap slot.
const GAP_PENALTY: f64 = 25.0;

/// Whether the offering carries every component the course requires.
pub(crate) fn offering_complete(course: &Course, offering: &Offering) -> bool {
    if course.declares(ComponentType::Lecture)
        && !offering.has_session_for(ComponentType::Lecture)
    {
        return false;
    }

    let wants_section = course.declares(ComponentType::Section);
    let wants_lab = course.declares(ComponentType::Lab);
    match (wants_section, wants_lab) {
        (true, true) => {
            offering.has_session_for(ComponentType::Section)
                || offering.has_session_for(ComponentType::Lab)
        }
        (true, false) => offering.has_session_for(ComponentType::Section),
        (false, true) => offering.has_session_for(ComponentType::Lab),
        (false, false) => true,
    }
}

/// Builds a schedule from one combination, or `None` when infeasible.
///
/// `selection[i]` indexes into `courses[i].offerings`.
pub(crate) fn build_schedule(
    courses: &[CourseOfferings],
    selection: &[usize],
    excluded_days: &BTreeSet<Weekday>,
) -> Option<Schedule> {
    debug_assert_eq!(courses.len(), selection.len());

    let mut scheduled = Vec::with_capacity(courses.len());
    let mut sessions: Vec<PlacedSession> = Vec::new();
    let mut occupancy: u32 = 0;
    // Slots used per day, indexed by Weekday::index().
    let mut day_slots: [Vec<u8>; 6] = Default::default();

    for (entry, &oi) in courses.iter().zip(selection) {
        let offering = &entry.offerings[oi];
        if !offering_complete(&entry.course, offering) {
            return None;
        }

        for (component_type, session) in offering.sessions() {
            let bit = occupancy_bit(session.day, session.slot);
            if occupancy & bit != 0 {
                return None;
            }
            occupancy |= bit;
            day_slots[session.day.index()].push(session.slot);
            sessions.push(PlacedSession {
                course_id: entry.course.id.clone(),
                component_type,
                session: session.clone(),
            });
        }

        scheduled.push(ScheduledCourse {
            course: entry.course.clone(),
            offering: offering.clone(),
        });
    }

    let days: Vec<Weekday> = Weekday::all()
        .into_iter()
        .filter(|d| !day_slots[d.index()].is_empty())
        .collect();
    let total_days = days.len();

    let mut gaps = 0usize;
    for slots in &mut day_slots {
        slots.sort_unstable();
        for pair in slots.windows(2) {
            gaps += (pair[1] - pair[0]) as usize - 1;
        }
    }

    let excluded_used: Vec<Weekday> = days
        .iter()
        .copied()
        .filter(|d| excluded_days.contains(d))
        .collect();
    let excluded_days_used = excluded_used.len();
    let excluded_slots: usize = excluded_used
        .iter()
        .map(|d| day_slots[d.index()].len())
        .sum();
    let lecture_on_excluded = sessions.iter().any(|p| {
        p.component_type == ComponentType::Lecture && excluded_days.contains(&p.session.day)
    });

    let mut score = BASE_SCORE;
    if excluded_days_used == 0 {
        score += NO_EXCLUDED_DAY_BONUS;
    } else {
        score -= EXCLUDED_DAY_PENALTY * excluded_days_used as f64;
        for day in &excluded_used {
            let slots = day_slots[day.index()].len() as f64;
            score -= EXCLUDED_SLOT_PENALTY * (slots - 1.0) * (slots - 1.0);
        }
        if lecture_on_excluded {
            score -= EXCLUDED_LECTURE_PENALTY;
        }
    }
    if total_days > 0 {
        score += FEW_DAYS_BONUS / total_days as f64;
    }
    score -= GAP_PENALTY * gaps as f64;

    Some(Schedule {
        courses: scheduled,
        sessions,
        days,
        total_days,
        excluded_days_used,
        excluded_slots,
        lecture_on_excluded,
        gaps,
        score,
    })
}
