//! Bounded retention of the best schedules seen so far.
//!
//! Keeps a score-descending list of at most `capacity` schedules via
//! binary-search insertion. The capacity is several times the requested
//! output size so the final multi-criteria re-sort has room to reorder
//! within the retained pool.

use crate::models::Schedule;

/// Pool capacity multiplier over the requested output size.
pub(crate) const RETENTION_FACTOR: usize = 4;

/// A bounded, score-sorted list of the best schedules.
#[derive(Debug, Default)]
pub(crate) struct TopK {
    items: Vec<Schedule>,
    capacity: usize,
}

impl TopK {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Inserts at the score-sorted position and truncates to capacity.
    ///
    /// Returns whether the schedule was retained. O(log K) search plus
    /// O(K) splice.
    pub fn insert(&mut self, schedule: Schedule) -> bool {
        let pos = self
            .items
            .partition_point(|s| s.score >= schedule.score);
        if pos >= self.capacity {
            return false;
        }
        self.items.insert(pos, schedule);
        self.items.truncate(self.capacity);
        true
    }

    /// Best-scoring schedule retained so far.
    pub fn best(&self) -> Option<&Schedule> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Consumes the retainer, yielding schedules in score order.
    pub fn into_sorted_vec(self) -> Vec<Schedule> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn schedule_with_score(score: f64) -> Schedule {
        Schedule {
            courses: Vec::new(),
            sessions: Vec::new(),
            days: vec![Weekday::Monday],
            total_days: 1,
            excluded_days_used: 0,
            excluded_slots: 0,
            lecture_on_excluded: false,
            gaps: 0,
            score,
        }
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut topk = TopK::new(10);
        for score in [3.0, 1.0, 5.0, 4.0, 2.0] {
            assert!(topk.insert(schedule_with_score(score)));
        }
        let scores: Vec<f64> = topk.into_sorted_vec().iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_truncates_to_capacity() {
        let mut topk = TopK::new(3);
        for score in [1.0, 2.0, 3.0, 4.0, 5.0] {
            topk.insert(schedule_with_score(score));
        }
        assert_eq!(topk.len(), 3);
        assert!(topk.is_full());
        let scores: Vec<f64> = topk.into_sorted_vec().iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_rejects_below_full_pool() {
        let mut topk = TopK::new(2);
        topk.insert(schedule_with_score(10.0));
        topk.insert(schedule_with_score(9.0));
        assert!(!topk.insert(schedule_with_score(1.0)));
        assert_eq!(topk.best().unwrap().score, 10.0);
    }

    #[test]
    fn test_equal_scores_keep_insertion_order() {
        let mut topk = TopK::new(5);
        topk.insert(schedule_with_score(1.0));
        topk.insert(schedule_with_score(1.0));
        assert_eq!(topk.len(), 2);
    }
}
