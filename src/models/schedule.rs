//! Schedule (engine output) model.
//!
//! A schedule is a validated, conflict-free selection of one offering per
//! course, carrying the flattened session list and the derived metrics
//! used for scoring and ranking.

use serde::{Deserialize, Serialize};

use super::{ComponentType, Course, Offering, Session, Weekday};

/// A course together with its selected offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCourse {
    /// The course.
    pub course: Course,
    /// The offering chosen for this course.
    pub offering: Offering,
}

/// A session placed in a schedule, with its course context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedSession {
    /// Owning course ID.
    pub course_id: String,
    /// Component type the session belongs to.
    pub component_type: ComponentType,
    /// The session itself.
    pub session: Session,
}

/// A generated weekly schedule.
///
/// Metrics are computed once at build time:
/// - `total_days`: distinct days with at least one session
/// - `excluded_days_used`: how many of those days the student excluded
/// - `excluded_slots`: total slots occupied on excluded days
/// - `gaps`: idle slots strictly between a day's first and last session
/// - `score`: composite retention heuristic (higher = better); the final
///   output ordering is the ranker's lexicographic comparator, not this
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Courses with their selected offerings.
    pub courses: Vec<ScheduledCourse>,
    /// All sessions, flattened across courses and components.
    pub sessions: Vec<PlacedSession>,
    /// Distinct days used, in week order.
    pub days: Vec<Weekday>,
    /// Number of distinct days used.
    pub total_days: usize,
    /// Days used that the student excluded.
    pub excluded_days_used: usize,
    /// Total session slots occupied on excluded days.
    pub excluded_slots: usize,
    /// Whether any lecture falls on an excluded day.
    pub lecture_on_excluded: bool,
    /// Total idle slots between same-day sessions.
    pub gaps: usize,
    /// Composite retention score (higher = better).
    pub score: f64,
}

impl Schedule {
    /// Sessions on a given day.
    pub fn sessions_on(&self, day: Weekday) -> Vec<&PlacedSession> {
        self.sessions
            .iter()
            .filter(|p| p.session.day == day)
            .collect()
    }

    /// First and last occupied slot on a given day, if any.
    pub fn day_span(&self, day: Weekday) -> Option<(u8, u8)> {
        let slots: Vec<u8> = self
            .sessions
            .iter()
            .filter(|p| p.session.day == day)
            .map(|p| p.session.slot)
            .collect();
        let min = slots.iter().copied().min()?;
        let max = slots.iter().copied().max()?;
        Some((min, max))
    }

    /// Whether the schedule includes the given course.
    pub fn contains_course(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.course.id == course_id)
    }

    /// Number of elective courses included.
    pub fn elective_count(&self) -> usize {
        self.courses.iter().filter(|c| c.course.is_elective).count()
    }

    /// Selected offering IDs in course order. Identifies the underlying
    /// combination, used to deduplicate schedules from overlapping
    /// search regions.
    pub fn selection_key(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.offering.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Component, Course, Offering, Session};

    fn sample_schedule() -> Schedule {
        let course = Course::new("C1")
            .with_code("CS101")
            .with_component_type(ComponentType::Lecture);
        let offering = Offering::new("O1").with_component(
            Component::new(ComponentType::Lecture)
                .with_session(Session::new(Weekday::Monday, 1)),
        );
        Schedule {
            courses: vec![ScheduledCourse { course, offering }],
            sessions: vec![
                PlacedSession {
                    course_id: "C1".into(),
                    component_type: ComponentType::Lecture,
                    session: Session::new(Weekday::Monday, 1),
                },
                PlacedSession {
                    course_id: "C1".into(),
                    component_type: ComponentType::Section,
                    session: Session::new(Weekday::Monday, 4),
                },
            ],
            days: vec![Weekday::Monday],
            total_days: 1,
            excluded_days_used: 0,
            excluded_slots: 0,
            lecture_on_excluded: false,
            gaps: 2,
            score: 100.0,
        }
    }

    #[test]
    fn test_sessions_on_day() {
        let s = sample_schedule();
        assert_eq!(s.sessions_on(Weekday::Monday).len(), 2);
        assert!(s.sessions_on(Weekday::Tuesday).is_empty());
    }

    #[test]
    fn test_day_span() {
        let s = sample_schedule();
        assert_eq!(s.day_span(Weekday::Monday), Some((1, 4)));
        assert_eq!(s.day_span(Weekday::Sunday), None);
    }

    #[test]
    fn test_contains_course_and_key() {
        let s = sample_schedule();
        assert!(s.contains_course("C1"));
        assert!(!s.contains_course("C2"));
        assert_eq!(s.selection_key(), vec!["O1"]);
        assert_eq!(s.elective_count(), 0);
    }

    #[test]
    fn test_schedule_serde_roundtrip() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_days, 1);
        assert_eq!(back.gaps, 2);
        assert_eq!(back.selection_key(), vec!["O1"]);
    }
}
