//! Decoded schedule: the concrete room/day/time assignment per exam.
//!
//! Produced by [`crate::ga::Decoder`] on every evaluation and discarded
//! afterwards; serializable so an export layer can persist the final one.

use serde::{Deserialize, Serialize};

/// Where and when one exam sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Day index in `[0, MAX_DAYS)`.
    pub day: usize,
    /// First occupied half-hour block of the day.
    pub start_block: usize,
    /// Rooms used, all sharing `(day, start_block)`.
    pub rooms: Vec<usize>,
    /// Sum of the rooms' capacities.
    pub total_capacity: u32,
}

/// Complete decoder output: one optional placement per exam index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSchedule {
    placements: Vec<Option<Placement>>,
}

impl ExamSchedule {
    /// Creates a schedule with every exam unassigned.
    pub fn unassigned(num_exams: usize) -> Self {
        Self {
            placements: vec![None; num_exams],
        }
    }

    /// Number of exams the schedule covers (assigned or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the schedule covers no exams.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placement for an exam, if it was assigned.
    #[inline]
    pub fn placement(&self, exam: usize) -> Option<&Placement> {
        self.placements[exam].as_ref()
    }

    /// Whether an exam was placed.
    #[inline]
    pub fn is_assigned(&self, exam: usize) -> bool {
        self.placements[exam].is_some()
    }

    /// Records a placement.
    pub fn assign(&mut self, exam: usize, placement: Placement) {
        self.placements[exam] = Some(placement);
    }

    /// Iterates `(exam, placement)` over assigned exams.
    pub fn iter_assigned(&self) -> impl Iterator<Item = (usize, &Placement)> {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (i, p)))
    }

    /// Count of placed exams.
    pub fn assigned_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_some()).count()
    }

    /// Count of exams left unplaced.
    pub fn unassigned_count(&self) -> usize {
        self.placements.len() - self.assigned_count()
    }

    /// Total exam-room pairings in use (objective 1 before scoring).
    pub fn room_pairings(&self) -> usize {
        self.iter_assigned().map(|(_, p)| p.rooms.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> ExamSchedule {
        let mut s = ExamSchedule::unassigned(3);
        s.assign(
            0,
            Placement {
                day: 2,
                start_block: 0,
                rooms: vec![1],
                total_capacity: 30,
            },
        );
        s.assign(
            2,
            Placement {
                day: 5,
                start_block: 4,
                rooms: vec![0, 1],
                total_capacity: 80,
            },
        );
        s
    }

    #[test]
    fn test_counts() {
        let s = sample_schedule();
        assert_eq!(s.assigned_count(), 2);
        assert_eq!(s.unassigned_count(), 1);
        assert_eq!(s.room_pairings(), 3);
    }

    #[test]
    fn test_placement_lookup() {
        let s = sample_schedule();
        assert!(s.is_assigned(0));
        assert!(!s.is_assigned(1));
        assert_eq!(s.placement(2).unwrap().rooms, vec![0, 1]);
    }

    #[test]
    fn test_serde_round_trip() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        let back: ExamSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.assigned_count(), 2);
        assert_eq!(back.placement(0).unwrap().day, 2);
    }
}
