//! Offering, component, and session models.
//!
//! An offering is one class's instantiation of a course: an atomic bundle
//! of components, each with its fixed weekly sessions. The engine picks at
//! most one offering per course and never moves a session — it only
//! accepts or rejects the bundle as a whole.
//!
//! # Time Representation
//!
//! The academic week has six teaching days (Saturday through Thursday)
//! and four teaching slots per day, numbered 1 to 4.

use serde::{Deserialize, Serialize};

use super::{ComponentType, Course};

/// First teaching slot of a day.
pub const MIN_SLOT: u8 = 1;
/// Last teaching slot of a day.
pub const MAX_SLOT: u8 = 4;

/// A teaching day of the six-day academic week, in week order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Weekday {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl Weekday {
    /// All teaching days in week order.
    pub fn all() -> [Weekday; 6] {
        [
            Weekday::Saturday,
            Weekday::Sunday,
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
        ]
    }

    /// Zero-based position within the week (Saturday = 0).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A fixed weekly occurrence of a component.
///
/// Room and instructor are display-only; feasibility depends solely on
/// `(day, slot)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Teaching day.
    pub day: Weekday,
    /// Teaching slot (1..=4).
    pub slot: u8,
    /// Room label, if assigned.
    pub room: Option<String>,
    /// Instructor name, if assigned.
    pub instructor: Option<String>,
}

impl Session {
    /// Creates a session at the given day and slot.
    pub fn new(day: Weekday, slot: u8) -> Self {
        Self {
            day,
            slot,
            room: None,
            instructor: None,
        }
    }

    /// Sets the room label.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the instructor name.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }
}

/// A component (lecture, section, or lab) within one offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Teaching unit type.
    pub component_type: ComponentType,
    /// Fixed sessions of this component (one in practice).
    pub sessions: Vec<Session>,
}

impl Component {
    /// Creates an empty component of the given type.
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            sessions: Vec::new(),
        }
    }

    /// Adds a session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.sessions.push(session);
        self
    }

    /// Whether this component has at least one session.
    pub fn has_session(&self) -> bool {
        !self.sessions.is_empty()
    }
}

/// One class's offering of a course: the atomic component bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    /// Unique offering identifier.
    pub id: String,
    /// Cohort/class label teaching this offering.
    pub class_name: String,
    /// Components bundled by this offering.
    pub components: Vec<Component>,
}

impl Offering {
    /// Creates a new offering with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_name: String::new(),
            components: Vec::new(),
        }
    }

    /// Sets the class label.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Adds a component.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Finds the component of the given type, if present.
    pub fn component(&self, component_type: ComponentType) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.component_type == component_type)
    }

    /// Whether a component of the given type exists and has a session.
    pub fn has_session_for(&self, component_type: ComponentType) -> bool {
        self.component(component_type)
            .is_some_and(Component::has_session)
    }

    /// Iterates all sessions across all components, with their types.
    pub fn sessions(&self) -> impl Iterator<Item = (ComponentType, &Session)> {
        self.components
            .iter()
            .flat_map(|c| c.sessions.iter().map(move |s| (c.component_type, s)))
    }

    /// Total session count across all components.
    pub fn session_count(&self) -> usize {
        self.components.iter().map(|c| c.sessions.len()).sum()
    }
}

/// A course together with its candidate offerings — the engine input unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOfferings {
    /// The course.
    pub course: Course,
    /// Candidate offerings (one per class teaching the course).
    pub offerings: Vec<Offering>,
}

impl CourseOfferings {
    /// Creates an input unit for the given course.
    pub fn new(course: Course) -> Self {
        Self {
            course,
            offerings: Vec::new(),
        }
    }

    /// Adds a candidate offering.
    pub fn with_offering(mut self, offering: Offering) -> Self {
        self.offerings.push(offering);
        self
    }
}
