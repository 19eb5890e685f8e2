//! Slot-based integer encoding of a candidate assignment.
//!
//! # Layout
//!
//! The vector has one logical slot per exam, each `SLOT_SIZE` integers wide:
//!
//! ```text
//! [exam, day, room_0, room_1, room_2, room_3]
//! ```
//!
//! - `exam ∈ [0, num_exams]`, where `num_exams` is the "empty slot" sentinel
//! - `day ∈ [0, MAX_DAYS)`
//! - `room_i ∈ [0, num_rooms]`, where `num_rooms` is the "no room" sentinel
//!
//! Sentinels exist only in the flat `i32` buffer so an integer-vector
//! optimizer can own and perturb it freely; every accessor on [`Encoding`]
//! translates them to `Option<usize>`. Slot order is meaningful: the decoder
//! resolves slots front to back, so earlier slots get first pick of free
//! time windows.

use crate::models::{Instance, MAX_DAYS};

/// Maximum rooms one exam may be split across.
pub const MAX_ROOMS_PER_SLOT: usize = 4;

/// Integers per slot: exam + day + room list.
pub const SLOT_SIZE: usize = 2 + MAX_ROOMS_PER_SLOT;

/// Field offsets within a slot.
const EXAM: usize = 0;
const DAY: usize = 1;
const ROOMS: usize = 2;

/// Vector layout for one instance: slot count and sentinel values.
///
/// Cheap to copy; components construct one from the instance they borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    num_exams: usize,
    num_rooms: usize,
}

impl Encoding {
    /// Layout for an instance.
    pub fn for_instance(instance: &Instance) -> Self {
        Self {
            num_exams: instance.num_exams(),
            num_rooms: instance.num_rooms(),
        }
    }

    /// Number of slots (one per exam).
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_exams
    }

    /// Total vector length.
    #[inline]
    pub fn vector_len(&self) -> usize {
        self.num_exams * SLOT_SIZE
    }

    /// Sentinel marking an empty slot.
    #[inline]
    pub fn empty_exam(&self) -> i32 {
        self.num_exams as i32
    }

    /// Sentinel marking an unused room field.
    #[inline]
    pub fn no_room(&self) -> i32 {
        self.num_rooms as i32
    }

    /// Asserts the vector matches this layout. A mismatch is a programmer
    /// error (wrong instance/vector pairing), not a data error.
    #[inline]
    pub fn check_vector(&self, vector: &[i32]) {
        assert_eq!(
            vector.len(),
            self.vector_len(),
            "encoded vector length {} does not match expected {} ({} slots of {})",
            vector.len(),
            self.vector_len(),
            self.num_exams,
            SLOT_SIZE,
        );
    }

    /// A vector with every slot empty (day 0, no rooms).
    pub fn empty_vector(&self) -> Vec<i32> {
        let mut v = vec![0; self.vector_len()];
        for slot in 0..self.num_slots() {
            self.clear_slot(&mut v, slot);
        }
        v
    }

    /// Exam in a slot; `None` for the empty sentinel or any out-of-range value.
    #[inline]
    pub fn exam(&self, vector: &[i32], slot: usize) -> Option<usize> {
        let raw = vector[slot * SLOT_SIZE + EXAM];
        if raw >= 0 && (raw as usize) < self.num_exams {
            Some(raw as usize)
        } else {
            None
        }
    }

    /// Writes the exam field (`None` stores the empty sentinel).
    #[inline]
    pub fn set_exam(&self, vector: &mut [i32], slot: usize, exam: Option<usize>) {
        vector[slot * SLOT_SIZE + EXAM] = match exam {
            Some(e) => e as i32,
            None => self.empty_exam(),
        };
    }

    /// Raw preferred-day field. May be out of range on unrepaired vectors;
    /// callers normalize.
    #[inline]
    pub fn day(&self, vector: &[i32], slot: usize) -> i32 {
        vector[slot * SLOT_SIZE + DAY]
    }

    /// Writes the preferred-day field.
    #[inline]
    pub fn set_day(&self, vector: &mut [i32], slot: usize, day: usize) {
        vector[slot * SLOT_SIZE + DAY] = day as i32;
    }

    /// Room at position `pos` of a slot; `None` for the sentinel or any
    /// out-of-range value.
    #[inline]
    pub fn room(&self, vector: &[i32], slot: usize, pos: usize) -> Option<usize> {
        debug_assert!(pos < MAX_ROOMS_PER_SLOT);
        let raw = vector[slot * SLOT_SIZE + ROOMS + pos];
        if raw >= 0 && (raw as usize) < self.num_rooms {
            Some(raw as usize)
        } else {
            None
        }
    }

    /// Writes a room field (`None` stores the no-room sentinel).
    #[inline]
    pub fn set_room(&self, vector: &mut [i32], slot: usize, pos: usize, room: Option<usize>) {
        debug_assert!(pos < MAX_ROOMS_PER_SLOT);
        vector[slot * SLOT_SIZE + ROOMS + pos] = match room {
            Some(r) => r as i32,
            None => self.no_room(),
        };
    }

    /// Valid rooms of a slot in field order. Does not deduplicate; callers
    /// that need set semantics deduplicate themselves.
    pub fn rooms(&self, vector: &[i32], slot: usize) -> Vec<usize> {
        (0..MAX_ROOMS_PER_SLOT)
            .filter_map(|pos| self.room(vector, slot, pos))
            .collect()
    }

    /// Resets a slot to empty: no exam, day 0, no rooms.
    pub fn clear_slot(&self, vector: &mut [i32], slot: usize) {
        self.set_exam(vector, slot, None);
        self.set_day(vector, slot, 0);
        for pos in 0..MAX_ROOMS_PER_SLOT {
            self.set_room(vector, slot, pos, None);
        }
    }

    /// Swaps two whole slots.
    pub fn swap_slots(&self, vector: &mut [i32], a: usize, b: usize) {
        if a == b {
            return;
        }
        for i in 0..SLOT_SIZE {
            vector.swap(a * SLOT_SIZE + i, b * SLOT_SIZE + i);
        }
    }

    /// Copies one whole slot out of the vector.
    pub fn slot_contents(&self, vector: &[i32], slot: usize) -> [i32; SLOT_SIZE] {
        let base = slot * SLOT_SIZE;
        let mut out = [0; SLOT_SIZE];
        out.copy_from_slice(&vector[base..base + SLOT_SIZE]);
        out
    }

    /// Writes one whole slot back into the vector.
    pub fn write_slot(&self, vector: &mut [i32], slot: usize, contents: &[i32; SLOT_SIZE]) {
        let base = slot * SLOT_SIZE;
        vector[base..base + SLOT_SIZE].copy_from_slice(contents);
    }

    /// Per-position `(lower, upper)` inclusive bounds, for integer-vector
    /// optimizers that sample or clamp against the encoding.
    pub fn bounds(&self) -> Vec<(i32, i32)> {
        let mut bounds = Vec::with_capacity(self.vector_len());
        for _ in 0..self.num_slots() {
            bounds.push((0, self.empty_exam()));
            bounds.push((0, MAX_DAYS as i32 - 1));
            for _ in 0..MAX_ROOMS_PER_SLOT {
                bounds.push((0, self.no_room()));
            }
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConflictPair, Exam, Room};

    fn sample_instance() -> Instance {
        let exams = vec![
            Exam::new("E0", 40, 2.0),
            Exam::new("E1", 25, 1.5),
            Exam::new("E2", 60, 2.0),
        ];
        let rooms = vec![Room::new("S0", 50), Room::new("S1", 30)];
        Instance::new(exams, rooms, vec![ConflictPair::new(0, 2)]).unwrap()
    }

    #[test]
    fn test_layout_sizes() {
        let enc = Encoding::for_instance(&sample_instance());
        assert_eq!(enc.num_slots(), 3);
        assert_eq!(enc.vector_len(), 3 * SLOT_SIZE);
        assert_eq!(enc.empty_exam(), 3);
        assert_eq!(enc.no_room(), 2);
    }

    #[test]
    fn test_empty_vector() {
        let enc = Encoding::for_instance(&sample_instance());
        let v = enc.empty_vector();
        for slot in 0..enc.num_slots() {
            assert_eq!(enc.exam(&v, slot), None);
            assert_eq!(enc.day(&v, slot), 0);
            assert!(enc.rooms(&v, slot).is_empty());
        }
    }

    #[test]
    fn test_field_round_trip() {
        let enc = Encoding::for_instance(&sample_instance());
        let mut v = enc.empty_vector();

        enc.set_exam(&mut v, 1, Some(2));
        enc.set_day(&mut v, 1, 7);
        enc.set_room(&mut v, 1, 0, Some(1));
        enc.set_room(&mut v, 1, 1, Some(0));

        assert_eq!(enc.exam(&v, 1), Some(2));
        assert_eq!(enc.day(&v, 1), 7);
        assert_eq!(enc.rooms(&v, 1), vec![1, 0]);

        enc.set_exam(&mut v, 1, None);
        assert_eq!(enc.exam(&v, 1), None);
    }

    #[test]
    fn test_out_of_range_reads_as_none() {
        let enc = Encoding::for_instance(&sample_instance());
        let mut v = enc.empty_vector();
        v[0] = 99; // exam field
        v[2] = -5; // room field
        assert_eq!(enc.exam(&v, 0), None);
        assert_eq!(enc.room(&v, 0, 0), None);
    }

    #[test]
    fn test_swap_slots() {
        let enc = Encoding::for_instance(&sample_instance());
        let mut v = enc.empty_vector();
        enc.set_exam(&mut v, 0, Some(1));
        enc.set_day(&mut v, 0, 3);
        enc.set_room(&mut v, 0, 0, Some(0));

        enc.swap_slots(&mut v, 0, 2);
        assert_eq!(enc.exam(&v, 0), None);
        assert_eq!(enc.exam(&v, 2), Some(1));
        assert_eq!(enc.day(&v, 2), 3);
        assert_eq!(enc.rooms(&v, 2), vec![0]);
    }

    #[test]
    fn test_bounds_shape() {
        let enc = Encoding::for_instance(&sample_instance());
        let bounds = enc.bounds();
        assert_eq!(bounds.len(), enc.vector_len());
        // Slot 0: exam bound includes the empty sentinel.
        assert_eq!(bounds[0], (0, 3));
        assert_eq!(bounds[1], (0, MAX_DAYS as i32 - 1));
        assert_eq!(bounds[2], (0, 2));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_length_mismatch_panics() {
        let enc = Encoding::for_instance(&sample_instance());
        enc.check_vector(&[0; 5]);
    }
}
