//! Problem instance: the immutable catalogue every component reads.
//!
//! Owns the exams, rooms, and conflict pairs, and precomputes what the
//! decoder, repair operator, and evaluator would otherwise recompute per
//! call: capacity-sorted room orders, per-exam duration blocks, and the
//! per-exam minimum-room lower bound.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Exam, Room};
use crate::validation::{validate_instance, ValidationError};

/// Number of days in the scheduling horizon.
pub const MAX_DAYS: usize = 25;

/// Half-hour blocks per day (13 hours).
pub const BLOCKS_PER_DAY: usize = 26;

/// An unordered pair of exam indices that share audience and should be
/// scheduled as many days apart as possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPair {
    /// First exam index.
    pub a: usize,
    /// Second exam index.
    pub b: usize,
}

impl ConflictPair {
    /// Creates a conflict pair.
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Immutable scheduling instance, shared read-only by every component.
#[derive(Debug, Clone)]
pub struct Instance {
    exams: Vec<Exam>,
    rooms: Vec<Room>,
    conflicts: Vec<ConflictPair>,

    exam_index: HashMap<String, usize>,
    room_index: HashMap<String, usize>,

    /// Room indices sorted by capacity, largest first (ties by index).
    rooms_by_capacity_desc: Vec<usize>,
    /// Room indices sorted by capacity, smallest first (ties by index).
    rooms_by_capacity_asc: Vec<usize>,

    /// Cached duration in blocks per exam.
    duration_blocks: Vec<usize>,
    /// Minimum rooms needed per exam (largest-capacity-first cover, at least 1).
    min_rooms: Vec<usize>,
}

impl Instance {
    /// Builds an instance, validating the input first.
    ///
    /// Fails if the input is structurally unusable (no rooms, duplicate ids,
    /// zero capacities, conflict indices out of range, ...). An `Instance`
    /// that exists is safe to schedule against.
    pub fn new(
        exams: Vec<Exam>,
        rooms: Vec<Room>,
        conflicts: Vec<ConflictPair>,
    ) -> Result<Self, Vec<ValidationError>> {
        validate_instance(&exams, &rooms, &conflicts)?;

        let exam_index = exams
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        let room_index = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        let mut rooms_by_capacity_desc: Vec<usize> = (0..rooms.len()).collect();
        rooms_by_capacity_desc.sort_by_key(|&i| std::cmp::Reverse(rooms[i].capacity));
        let mut rooms_by_capacity_asc: Vec<usize> = (0..rooms.len()).collect();
        rooms_by_capacity_asc.sort_by_key(|&i| rooms[i].capacity);

        let duration_blocks = exams.iter().map(|e| e.duration_blocks()).collect();
        let min_rooms = Self::min_rooms_per_exam(&exams, &rooms, &rooms_by_capacity_desc);

        Ok(Self {
            exams,
            rooms,
            conflicts,
            exam_index,
            room_index,
            rooms_by_capacity_desc,
            rooms_by_capacity_asc,
            duration_blocks,
            min_rooms,
        })
    }

    /// Lower bound on rooms per exam: accumulate the largest capacities
    /// until enrollment is covered.
    fn min_rooms_per_exam(exams: &[Exam], rooms: &[Room], desc: &[usize]) -> Vec<usize> {
        exams
            .iter()
            .map(|exam| {
                let mut needed = 0;
                let mut covered = 0u32;
                for &room_idx in desc {
                    if covered >= exam.enrolled {
                        break;
                    }
                    covered += rooms[room_idx].capacity;
                    needed += 1;
                }
                needed.max(1)
            })
            .collect()
    }

    /// Number of exams.
    #[inline]
    pub fn num_exams(&self) -> usize {
        self.exams.len()
    }

    /// Number of rooms.
    #[inline]
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Exam by index.
    #[inline]
    pub fn exam(&self, index: usize) -> &Exam {
        &self.exams[index]
    }

    /// Room by index.
    #[inline]
    pub fn room(&self, index: usize) -> &Room {
        &self.rooms[index]
    }

    /// All exams, in index order.
    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// All rooms, in index order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Conflict pairs.
    pub fn conflicts(&self) -> &[ConflictPair] {
        &self.conflicts
    }

    /// Index of an exam id, if present.
    pub fn exam_index(&self, id: &str) -> Option<usize> {
        self.exam_index.get(id).copied()
    }

    /// Index of a room id, if present.
    pub fn room_index(&self, id: &str) -> Option<usize> {
        self.room_index.get(id).copied()
    }

    /// Room indices ordered by capacity, largest first.
    pub fn rooms_by_capacity_desc(&self) -> &[usize] {
        &self.rooms_by_capacity_desc
    }

    /// Room indices ordered by capacity, smallest first.
    pub fn rooms_by_capacity_asc(&self) -> &[usize] {
        &self.rooms_by_capacity_asc
    }

    /// Cached duration in half-hour blocks for an exam.
    #[inline]
    pub fn duration_blocks(&self, exam: usize) -> usize {
        self.duration_blocks[exam]
    }

    /// Minimum number of rooms needed to seat an exam.
    #[inline]
    pub fn min_rooms(&self, exam: usize) -> usize {
        self.min_rooms[exam]
    }

    /// Sum of the per-exam minimum room counts; the lower bound on the
    /// room-pairing objective used for excess reporting.
    pub fn total_min_rooms(&self) -> usize {
        self.min_rooms.iter().sum()
    }

    /// Capacity of a room set.
    pub fn capacity_of(&self, room_indices: &[usize]) -> u32 {
        room_indices.iter().map(|&r| self.rooms[r].capacity).sum()
    }
}
