//! Input validation for schedule generation.
//!
//! Checks structural integrity of the course/offering snapshot before
//! enumeration begins. Detects:
//! - Empty course set
//! - Courses with no candidate offerings
//! - More than two selected electives
//! - Duplicate course or offering IDs
//! - Session slots outside the teaching range
//!
//! A failed check is fatal to the invocation; an infeasible combination
//! found later during enumeration is not (that is a routine outcome).

use std::collections::HashSet;

use crate::models::{CourseOfferings, MAX_SLOT, MIN_SLOT};

/// Maximum electives a student may select.
pub const MAX_ELECTIVES: usize = 2;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No courses were supplied at all.
    EmptyCourseSet,
    /// A course has no candidate offerings.
    NoOfferings,
    /// More than [`MAX_ELECTIVES`] elective courses were selected.
    TooManyElectives,
    /// Two entities share the same ID.
    DuplicateId,
    /// A session slot lies outside `MIN_SLOT..=MAX_SLOT`.
    InvalidSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the engine input snapshot.
///
/// Checks:
/// 1. At least one course across core and electives
/// 2. At most [`MAX_ELECTIVES`] elective course entries
/// 3. Every course has at least one candidate offering
/// 4. No duplicate course IDs across core and electives
/// 5. No duplicate offering IDs within a course
/// 6. Every session slot is in `MIN_SLOT..=MAX_SLOT`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(core: &[CourseOfferings], electives: &[CourseOfferings]) -> ValidationResult {
    let mut errors = Vec::new();

    if core.is_empty() && electives.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCourseSet,
            "No courses to schedule",
        ));
    }

    if electives.len() > MAX_ELECTIVES {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyElectives,
            format!(
                "{} electives selected, at most {MAX_ELECTIVES} allowed",
                electives.len()
            ),
        ));
    }

    let mut course_ids = HashSet::new();
    for entry in core.iter().chain(electives) {
        if !course_ids.insert(entry.course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", entry.course.id),
            ));
        }

        if entry.offerings.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoOfferings,
                format!("Course '{}' has no candidate offerings", entry.course.id),
            ));
        }

        let mut offering_ids = HashSet::new();
        for offering in &entry.offerings {
            if !offering_ids.insert(offering.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "Duplicate offering ID '{}' in course '{}'",
                        offering.id, entry.course.id
                    ),
                ));
            }

            for (_, session) in offering.sessions() {
                if session.slot < MIN_SLOT || session.slot > MAX_SLOT {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidSlot,
                        format!(
                            "Offering '{}' has a session at slot {} (valid: {MIN_SLOT}..={MAX_SLOT})",
                            offering.id, session.slot
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
