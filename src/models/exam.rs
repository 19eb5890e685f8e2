//! Exam model.
//!
//! An exam is the schedulable unit: it has an enrollment (how many seats
//! it needs across its assigned rooms) and a duration in hours, which the
//! rest of the crate consumes as half-hour blocks.

use serde::{Deserialize, Serialize};

/// A timed activity to be placed in one or more rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// Unique exam identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Number of enrolled students (seats required).
    pub enrolled: u32,
    /// Duration in hours (may be fractional, e.g. 1.5).
    pub duration_hours: f64,
}

impl Exam {
    /// Creates a new exam.
    pub fn new(id: impl Into<String>, enrolled: u32, duration_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            enrolled,
            duration_hours,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Duration in half-hour blocks, rounded up.
    #[inline]
    pub fn duration_blocks(&self) -> usize {
        (self.duration_hours * 2.0).ceil() as usize
    }
}
