//! Academic timetable generation for a slot-grid week.
//!
//! Given one term's course offerings (each offering a coordinated set of
//! lecture, section, and lab sessions on a six-day, four-slot grid) and a
//! student's constraints, the engine enumerates "one offering per course"
//! combinations, prunes conflicts, scores and refines the survivors, and
//! returns a ranked list of the best weekly schedules.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `Offering`, `Session`,
//!   `Weekday`, `Schedule`
//! - **`validation`**: Input integrity checks (duplicate IDs, slot range,
//!   elective bound)
//! - **`engine`**: The generation pipeline — conflict matrix, odometer
//!   enumeration, bounded retention, local search, multi-criteria ranking
//!
//! # Example
//!
//! ```no_run
//! use timetable_engine::engine::{Engine, GenerateRequest};
//!
//! # fn run(core: Vec<timetable_engine::models::CourseOfferings>) {
//! let request = GenerateRequest::new(core, vec![]).with_seed(7);
//! let result = Engine::new().generate(&request).unwrap();
//! for schedule in &result.schedules {
//!     println!("{} days, {} gaps", schedule.total_days, schedule.gaps);
//! }
//! # }
//! ```
//!
//! # References
//!
//! - Knuth, TAOCP Vol. 4A, 7.2.1.1 "Generating all n-tuples"
//! - Aarts & Lenstra (1997), "Local Search in Combinatorial Optimization"

pub mod engine;
pub mod models;
pub mod validation;
