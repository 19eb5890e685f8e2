//! Input validation for scheduling instances.
//!
//! Checks structural integrity of exams, rooms, and conflict pairs before
//! an [`crate::models::Instance`] is built. Detects:
//! - Missing rooms (nothing can be scheduled)
//! - Duplicate IDs
//! - Zero enrollments or capacities
//! - Durations that cannot fit inside one day
//! - Conflict pairs referencing unknown exams

use std::collections::HashSet;

use crate::models::{ConflictPair, Exam, Room, BLOCKS_PER_DAY};

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
    /// The instance has no rooms at all.
    NoRooms,
    /// Two entities share the same ID.
    DuplicateId,
    /// An exam has zero enrolled students.
    EmptyExam,
    /// A room has zero capacity.
    ZeroCapacity,
    /// An exam's duration exceeds the blocks available in one day.
    DurationTooLong,
    /// A conflict pair references an exam index that doesn't exist.
    InvalidConflictIndex,
    /// A conflict pair references the same exam twice.
    SelfConflict,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the raw input of a scheduling instance.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(
    exams: &[Exam],
    rooms: &[Room],
    conflicts: &[ConflictPair],
) -> ValidationResult {
    let mut errors = Vec::new();

    if rooms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRooms,
            "Instance has no rooms",
        ));
    }

    let mut exam_ids = HashSet::new();
    for exam in exams {
        if !exam_ids.insert(exam.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate exam ID: {}", exam.id),
            ));
        }
        if exam.enrolled == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyExam,
                format!("Exam '{}' has no enrolled students", exam.id),
            ));
        }
        if exam.duration_blocks() > BLOCKS_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::DurationTooLong,
                format!(
                    "Exam '{}' needs {} blocks but a day has {}",
                    exam.id,
                    exam.duration_blocks(),
                    BLOCKS_PER_DAY
                ),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for room in rooms {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Room '{}' has zero capacity", room.id),
            ));
        }
    }

    for pair in conflicts {
        if pair.a >= exams.len() || pair.b >= exams.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConflictIndex,
                format!(
                    "Conflict pair ({}, {}) references an exam index out of range (have {})",
                    pair.a,
                    pair.b,
                    exams.len()
                ),
            ));
        } else if pair.a == pair.b {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfConflict,
                format!("Conflict pair ({}, {}) pairs an exam with itself", pair.a, pair.b),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_exams() -> Vec<Exam> {
        vec![Exam::new("E0", 40, 2.0), Exam::new("E1", 25, 1.5)]
    }

    fn sample_rooms() -> Vec<Room> {
        vec![Room::new("S0", 50), Room::new("S1", 30)]
    }

    #[test]
    fn test_valid_input() {
        let conflicts = vec![ConflictPair::new(0, 1)];
        assert!(validate_instance(&sample_exams(), &sample_rooms(), &conflicts).is_ok());
    }

    #[test]
    fn test_no_rooms() {
        let errors = validate_instance(&sample_exams(), &[], &[]).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::NoRooms));
    }

    #[test]
    fn test_duplicate_exam_id() {
        let exams = vec![Exam::new("E0", 40, 2.0), Exam::new("E0", 10, 1.0)];
        let errors = validate_instance(&exams, &sample_rooms(), &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("exam")));
    }

    #[test]
    fn test_duplicate_room_id() {
        let rooms = vec![Room::new("S0", 50), Room::new("S0", 30)];
        let errors = validate_instance(&sample_exams(), &rooms, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_zero_enrollment_and_capacity() {
        let exams = vec![Exam::new("E0", 0, 1.0)];
        let rooms = vec![Room::new("S0", 0)];
        let errors = validate_instance(&exams, &rooms, &[]).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyExam));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroCapacity));
    }

    #[test]
    fn test_duration_too_long() {
        // 14 hours = 28 blocks > 26 blocks per day.
        let exams = vec![Exam::new("E0", 40, 14.0)];
        let errors = validate_instance(&exams, &sample_rooms(), &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DurationTooLong));
    }

    #[test]
    fn test_conflict_index_out_of_range() {
        let conflicts = vec![ConflictPair::new(0, 9)];
        let errors = validate_instance(&sample_exams(), &sample_rooms(), &conflicts).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidConflictIndex));
    }

    #[test]
    fn test_self_conflict() {
        let conflicts = vec![ConflictPair::new(1, 1)];
        let errors = validate_instance(&sample_exams(), &sample_rooms(), &conflicts).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SelfConflict));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let exams = vec![Exam::new("E0", 0, 14.0)];
        let errors = validate_instance(&exams, &[], &[ConflictPair::new(5, 6)]).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
