//! Final multi-criteria ranking and tiered selection.
//!
//! The raw score is only a retention heuristic: once candidates get close,
//! a single scalar cannot safely encode strict priority order. The output
//! ordering is therefore re-derived from an explicit lexicographic
//! comparator, and schedules are grouped into quality tiers drained in
//! priority order.
//!
//! # Comparator (earlier = better)
//!
//! 1. Fewer excluded days used
//! 2. No lecture on any excluded day beats having one
//! 3. Fewer total slots occupied on excluded days
//! 4. Fewer total days
//! 5. Fewer gaps
//! 6. Higher raw score (tiebreaker only)

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Schedule;

/// Quality grouping of a generated schedule, in output priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityTier {
    /// No excluded days, at most 3 days, at most 2 gaps.
    Excellent,
    /// No excluded days, at most 4 days, at most 4 gaps.
    Good,
    /// No excluded days, at most 5 days.
    Acceptable,
    /// No excluded days, anything else.
    OtherPerfect,
    /// Uses at least one excluded day.
    WithExcludedDays,
}

/// Classifies a schedule into its quality tier.
pub fn tier_of(schedule: &Schedule) -> QualityTier {
    if schedule.excluded_days_used > 0 {
        QualityTier::WithExcludedDays
    } else if schedule.total_days <= 3 && schedule.gaps <= 2 {
        QualityTier::Excellent
    } else if schedule.total_days <= 4 && schedule.gaps <= 4 {
        QualityTier::Good
    } else if schedule.total_days <= 5 {
        QualityTier::Acceptable
    } else {
        QualityTier::OtherPerfect
    }
}

/// Lexicographic ranking comparator; `Less` ranks earlier in the output.
pub fn compare(a: &Schedule, b: &Schedule) -> Ordering {
    a.excluded_days_used
        .cmp(&b.excluded_days_used)
        .then_with(|| a.lecture_on_excluded.cmp(&b.lecture_on_excluded))
        .then_with(|| a.excluded_slots.cmp(&b.excluded_slots))
        .then_with(|| a.total_days.cmp(&b.total_days))
        .then_with(|| a.gaps.cmp(&b.gaps))
        .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
}

/// Orders the retained pool by comparator within tiers, drains tiers in
/// priority order, and truncates to the target count. A lower tier never
/// precedes an unexhausted higher one.
pub(crate) fn select(mut pool: Vec<Schedule>, target_count: usize) -> Vec<Schedule> {
    pool.sort_by(compare);
    // Stable: preserves comparator order within each tier.
    pool.sort_by_key(tier_of);
    pool.truncate(target_count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn schedule(
        excluded_days_used: usize,
        lecture_on_excluded: bool,
        excluded_slots: usize,
        total_days: usize,
        gaps: usize,
        score: f64,
    ) -> Schedule {
        Schedule {
            courses: Vec::new(),
            sessions: Vec::new(),
            days: vec![Weekday::Monday],
            total_days,
            excluded_days_used,
            excluded_slots,
            lecture_on_excluded,
            gaps,
            score,
        }
    }

    #[test]
    fn test_fewer_excluded_days_wins_outright() {
        // Higher score cannot compensate for an excluded day.
        let a = schedule(0, false, 0, 6, 10, 1.0);
        let b = schedule(1, false, 1, 2, 0, 9999.0);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_no_lecture_on_excluded_beats_one() {
        let a = schedule(1, false, 3, 4, 2, 1.0);
        let b = schedule(1, true, 1, 2, 0, 9999.0);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_fewer_excluded_slots_then_days_then_gaps() {
        let fewer_slots = schedule(1, false, 1, 5, 5, 1.0);
        let more_slots = schedule(1, false, 3, 2, 0, 9999.0);
        assert_eq!(compare(&fewer_slots, &more_slots), Ordering::Less);

        let fewer_days = schedule(0, false, 0, 3, 5, 1.0);
        let more_days = schedule(0, false, 0, 4, 0, 9999.0);
        assert_eq!(compare(&fewer_days, &more_days), Ordering::Less);

        let fewer_gaps = schedule(0, false, 0, 3, 1, 1.0);
        let more_gaps = schedule(0, false, 0, 3, 2, 9999.0);
        assert_eq!(compare(&fewer_gaps, &more_gaps), Ordering::Less);
    }

    #[test]
    fn test_score_is_final_tiebreaker() {
        let low = schedule(0, false, 0, 3, 1, 10.0);
        let high = schedule(0, false, 0, 3, 1, 20.0);
        assert_eq!(compare(&high, &low), Ordering::Less);
    }

    #[test]
    fn test_saturday_lab_beats_saturday_lecture_block() {
        // Spec scenario: X uses 1 slot on Saturday (a lab), Y uses 3
        // slots including a lecture; X must rank strictly above Y.
        let x = schedule(1, false, 1, 4, 2, 100.0);
        let y = schedule(1, true, 3, 4, 2, 100.0);
        assert_eq!(compare(&x, &y), Ordering::Less);
    }

    #[test]
    fn test_tier_classification() {
        assert_eq!(tier_of(&schedule(0, false, 0, 3, 2, 0.0)), QualityTier::Excellent);
        assert_eq!(tier_of(&schedule(0, false, 0, 4, 4, 0.0)), QualityTier::Good);
        assert_eq!(tier_of(&schedule(0, false, 0, 3, 3, 0.0)), QualityTier::Good);
        assert_eq!(tier_of(&schedule(0, false, 0, 5, 9, 0.0)), QualityTier::Acceptable);
        assert_eq!(tier_of(&schedule(0, false, 0, 6, 0, 0.0)), QualityTier::OtherPerfect);
        assert_eq!(
            tier_of(&schedule(2, true, 4, 3, 0, 0.0)),
            QualityTier::WithExcludedDays
        );
    }

    #[test]
    fn test_select_drains_tiers_in_order() {
        // An Acceptable schedule with fewer days must not jump ahead of a
        // Good one: tier order outranks the comparator across tiers.
        let good = schedule(0, false, 0, 4, 1, 1.0); // Good
        let acceptable = schedule(0, false, 0, 3, 9, 1.0); // 3 days but 9 gaps
        assert_eq!(tier_of(&acceptable), QualityTier::Acceptable);

        let out = select(vec![acceptable, good], 10);
        assert_eq!(tier_of(&out[0]), QualityTier::Good);
        assert_eq!(tier_of(&out[1]), QualityTier::Acceptable);
    }

    #[test]
    fn test_select_truncates_to_target() {
        let pool: Vec<Schedule> = (0..10)
            .map(|i| schedule(0, false, 0, 3, 0, i as f64))
            .collect();
        let out = select(pool, 4);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].score, 9.0);
    }

    #[test]
    fn test_select_is_idempotent() {
        let pool = vec![
            schedule(1, true, 3, 4, 2, 5.0),
            schedule(0, false, 0, 3, 0, 1.0),
            schedule(0, false, 0, 4, 4, 2.0),
            schedule(0, false, 0, 6, 1, 3.0),
        ];
        let once = select(pool, 10);
        let keys: Vec<f64> = once.iter().map(|s| s.score).collect();
        let twice = select(once, 10);
        let keys_again: Vec<f64> = twice.iter().map(|s| s.score).collect();
        assert_eq!(keys, keys_again);
    }

    #[test]
    fn test_with_excluded_days_sorted_among_themselves() {
        let worse = schedule(2, false, 2, 3, 0, 1.0);
        let better = schedule(1, true, 3, 5, 4, 1.0);
        let out = select(vec![worse.clone(), better.clone()], 10);
        assert_eq!(out[0].excluded_days_used, 1);
        assert_eq!(out[1].excluded_days_used, 2);
    }
}
