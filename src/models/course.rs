//! Course model.
//!
//! A course declares which component types (lecture, section, lab) a
//! student must attend. The engine uses the declaration to decide whether
//! a chosen offering is complete: a lecture is always required when
//! declared; when both section and lab are declared, at least one of the
//! two must carry a session.

use serde::{Deserialize, Serialize};

/// A teaching unit type within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    /// Main lecture (code `L`).
    Lecture,
    /// Discussion/exercise section (code `S`).
    Section,
    /// Laboratory (code `LB`).
    Lab,
}

impl ComponentType {
    /// Short code used in timetable listings.
    pub fn code(&self) -> &'static str {
        match self {
            ComponentType::Lecture => "L",
            ComponentType::Section => "S",
            ComponentType::Lab => "LB",
        }
    }
}

/// A course as offered in a term.
///
/// Immutable input to the engine. The `component_types` set drives the
/// completeness check in the schedule builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Catalog code (e.g. "CS201").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Whether the course is an elective (students pick at most two).
    pub is_elective: bool,
    /// Component types this course requires, in declaration order.
    pub component_types: Vec<ComponentType>,
}

impl Course {
    /// Creates a new core course with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: String::new(),
            name: String::new(),
            is_elective: false,
            component_types: Vec::new(),
        }
    }

    /// Sets the catalog code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the course as an elective.
    pub fn elective(mut self) -> Self {
        self.is_elective = true;
        self
    }

    /// Adds a required component type.
    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_types.push(component_type);
        self
    }

    /// Whether the course declares the given component type.
    pub fn declares(&self, component_type: ComponentType) -> bool {
        self.component_types.contains(&component_type)
    }
}
