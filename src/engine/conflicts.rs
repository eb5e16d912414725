//! Pairwise offering conflict precomputation.
//!
//! Builds, once per invocation, a symmetric lookup marking every pair of
//! offerings (from different courses) whose session sets collide on some
//! `(day, slot)`. Enumeration then reduces the per-combination feasibility
//! check to O(pairs) constant-time lookups instead of re-scanning sessions.
//!
//! # Algorithm
//!
//! Each offering's sessions are condensed into a 24-bit occupancy mask
//! (6 days x 4 slots); two offerings conflict iff their masks intersect.
//! Offerings of the same course are never compared — a schedule uses one
//! offering per course, so they cannot co-occur.
//!
//! Complexity: O(P^2) over P total offerings, after an O(P * S) mask pass.

use crate::models::{CourseOfferings, Offering, Weekday, MAX_SLOT};

/// Occupancy bit for a `(day, slot)` cell of the weekly grid.
pub(crate) fn occupancy_bit(day: Weekday, slot: u8) -> u32 {
    1 << (day.index() as u32 * MAX_SLOT as u32 + (slot - 1) as u32)
}

/// Occupancy mask over all sessions of an offering.
///
/// An offering with zero sessions yields an empty mask and therefore
/// contributes no conflicts (it may still fail the schedule builder's
/// completeness check, which is a separate concern).
pub(crate) fn occupancy_mask(offering: &Offering) -> u32 {
    offering
        .sessions()
        .fold(0, |mask, (_, s)| mask | occupancy_bit(s.day, s.slot))
}

/// Symmetric conflict lookup over all offerings under consideration.
///
/// Indexed by `(course position, offering position)` pairs against the
/// course list the matrix was built from.
#[derive(Debug)]
pub struct ConflictMatrix {
    /// Global index base per course: `base[i]` is the flat index of
    /// course i's first offering.
    bases: Vec<usize>,
    /// Total offering count.
    size: usize,
    /// Dense symmetric matrix, `size * size` cells.
    cells: Vec<bool>,
}

impl ConflictMatrix {
    /// Builds the matrix from the full list of courses under consideration.
    pub fn build(courses: &[CourseOfferings]) -> Self {
        let mut bases = Vec::with_capacity(courses.len());
        let mut size = 0;
        for entry in courses {
            bases.push(size);
            size += entry.offerings.len();
        }

        let mut masks = Vec::with_capacity(size);
        let mut owner = Vec::with_capacity(size);
        for (ci, entry) in courses.iter().enumerate() {
            for offering in &entry.offerings {
                masks.push(occupancy_mask(offering));
                owner.push(ci);
            }
        }

        let mut cells = vec![false; size * size];
        for a in 0..size {
            if masks[a] == 0 {
                continue;
            }
            for b in (a + 1)..size {
                if owner[a] == owner[b] {
                    continue;
                }
                if masks[a] & masks[b] != 0 {
                    cells[a * size + b] = true;
                    cells[b * size + a] = true;
                }
            }
        }

        Self { bases, size, cells }
    }

    /// Whether course `ca`'s offering `oa` collides with course `cb`'s
    /// offering `ob` on any `(day, slot)`.
    #[inline]
    pub fn conflicts(&self, ca: usize, oa: usize, cb: usize, ob: usize) -> bool {
        let a = self.bases[ca] + oa;
        let b = self.bases[cb] + ob;
        self.cells[a * self.size + b]
    }

    /// Whether any pair within the given selection (one offering index per
    /// course) collides. This is the enumeration pruning predicate.
    pub fn selection_conflicts(&self, selection: &[usize]) -> bool {
        for a in 0..selection.len() {
            for b in (a + 1)..selection.len() {
                if self.conflicts(a, selection[a], b, selection[b]) {
                    return true;
                }
            }
        }
        false
    }

    /// Total offerings covered by the matrix.
    pub fn offering_count(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Component, ComponentType, Course, Offering, Session};

    fn offering(id: &str, sessions: &[(Weekday, u8)]) -> Offering {
        let mut component = Component::new(ComponentType::Lecture);
        for &(day, slot) in sessions {
            component = component.with_session(Session::new(day, slot));
        }
        Offering::new(id).with_component(component)
    }

    fn course(id: &str, offerings: Vec<Offering>) -> CourseOfferings {
        let mut entry =
            CourseOfferings::new(Course::new(id).with_component_type(ComponentType::Lecture));
        for o in offerings {
            entry = entry.with_offering(o);
        }
        entry
    }

    #[test]
    fn test_occupancy_bits_distinct() {
        let mut seen = std::collections::HashSet::new();
        for day in Weekday::all() {
            for slot in 1..=4 {
                assert!(seen.insert(occupancy_bit(day, slot)));
            }
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_conflict_on_shared_slot() {
        let courses = vec![
            course("A", vec![offering("A1", &[(Weekday::Monday, 1)])]),
            course("B", vec![offering("B1", &[(Weekday::Monday, 1)])]),
        ];
        let matrix = ConflictMatrix::build(&courses);
        assert!(matrix.conflicts(0, 0, 1, 0));
        assert!(matrix.conflicts(1, 0, 0, 0)); // symmetric
        assert!(matrix.selection_conflicts(&[0, 0]));
    }

    #[test]
    fn test_no_conflict_on_disjoint_slots() {
        let courses = vec![
            course("A", vec![offering("A1", &[(Weekday::Monday, 1)])]),
            course("B", vec![offering("B1", &[(Weekday::Monday, 2)])]),
        ];
        let matrix = ConflictMatrix::build(&courses);
        assert!(!matrix.conflicts(0, 0, 1, 0));
        assert!(!matrix.selection_conflicts(&[0, 0]));
    }

    #[test]
    fn test_same_course_offerings_never_compared() {
        // Both offerings of A occupy Mon/1; they must not be marked
        // against each other.
        let courses = vec![course(
            "A",
            vec![
                offering("A1", &[(Weekday::Monday, 1)]),
                offering("A2", &[(Weekday::Monday, 1)]),
            ],
        )];
        let matrix = ConflictMatrix::build(&courses);
        assert!(!matrix.conflicts(0, 0, 0, 1));
    }

    #[test]
    fn test_zero_session_offering_contributes_nothing() {
        let empty = Offering::new("A1").with_component(Component::new(ComponentType::Lecture));
        let courses = vec![
            course("A", vec![empty]),
            course("B", vec![offering("B1", &[(Weekday::Monday, 1)])]),
        ];
        let matrix = ConflictMatrix::build(&courses);
        assert!(!matrix.conflicts(0, 0, 1, 0));
    }

    #[test]
    fn test_both_pairings_flagged() {
        // Spec scenario: A1 and A2 lectures both collide with B1's
        // Mon/slot1 lecture.
        let courses = vec![
            course(
                "A",
                vec![
                    offering("A1", &[(Weekday::Monday, 1), (Weekday::Tuesday, 2)]),
                    offering("A2", &[(Weekday::Monday, 1), (Weekday::Wednesday, 1)]),
                ],
            ),
            course("B", vec![offering("B1", &[(Weekday::Monday, 1)])]),
        ];
        let matrix = ConflictMatrix::build(&courses);
        assert!(matrix.conflicts(0, 0, 1, 0));
        assert!(matrix.conflicts(0, 1, 1, 0));
        assert!(matrix.selection_conflicts(&[0, 0]));
        assert!(matrix.selection_conflicts(&[1, 0]));
    }

    #[test]
    fn test_offering_count() {
        let courses = vec![
            course(
                "A",
                vec![
                    offering("A1", &[(Weekday::Monday, 1)]),
                    offering("A2", &[(Weekday::Monday, 2)]),
                ],
            ),
            course("B", vec![offering("B1", &[(Weekday::Tuesday, 1)])]),
        ];
        let matrix = ConflictMatrix::build(&courses);
        assert_eq!(matrix.offering_count(), 3);
    }
}
