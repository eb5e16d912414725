//! Timetable domain models.
//!
//! Core data types for representing a term's course offerings and the
//! engine's generated schedules.
//!
//! # Shape
//!
//! | Type | Meaning |
//! |------|---------|
//! | Course | A course and its required component types |
//! | Offering | One class's atomic bundle of components |
//! | Component | Lecture / Section / Lab within an offering |
//! | Session | Fixed (day, slot) occurrence of a component |
//! | CourseOfferings | A course with its candidate offerings (engine input) |
//! | Schedule | A validated, scored selection (engine output) |

mod course;
mod offering;
mod schedule;

pub use course::{ComponentType, Course};
pub use offering::{Component, CourseOfferings, Offering, Session, Weekday, MAX_SLOT, MIN_SLOT};
pub use schedule::{PlacedSession, Schedule, ScheduledCourse};
